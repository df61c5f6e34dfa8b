use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::info;

use finna_client::search::records;
use finna_client::{
    image_url, Config, FinnaClient, Language, ParamValue, RecordOptions, SearchRequest, SearchType,
    SortMethod,
};

/// Command line access to the Finna.fi REST API.
#[derive(Parser, Debug)]
#[command(name = "finna", version, about = "Search and retrieve records from Finna.fi")]
struct Cli {
    /// API base URL (overrides FINNA_API_BASE).
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for records.
    Search(SearchArgs),
    /// Retrieve a single record by ID.
    Record {
        id: String,
        #[command(flatten)]
        options: RecordArgs,
    },
    /// Retrieve several records by ID; unmatched IDs are skipped.
    Records {
        #[arg(required = true)]
        ids: Vec<String>,
        #[command(flatten)]
        options: RecordArgs,
    },
    /// Walk through a few sample searches and lookups.
    Demo,
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Free text query; empty matches everything.
    #[arg(default_value = "")]
    lookfor: String,
    #[arg(long = "type", default_value_t = SearchType::AllFields)]
    search_type: SearchType,
    #[arg(long = "field")]
    fields: Vec<String>,
    #[arg(long = "filter")]
    filters: Vec<String>,
    #[arg(long = "facet")]
    facets: Vec<String>,
    #[arg(long)]
    sort: Option<SortMethod>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    lng: Option<Language>,
    /// Extra API parameter as key=value; repeat a key for multiple values.
    #[arg(long = "param", value_name = "KEY=VALUE")]
    params: Vec<String>,
}

#[derive(Args, Debug)]
struct RecordArgs {
    #[arg(long = "field")]
    fields: Vec<String>,
    #[arg(long)]
    lng: Option<Language>,
}

impl RecordArgs {
    fn to_options(&self) -> RecordOptions {
        let mut options = RecordOptions::new();
        if !self.fields.is_empty() {
            options = options.fields(self.fields.iter().cloned());
        }
        if let Some(lng) = self.lng {
            options = options.language(lng);
        }
        options
    }
}

impl SearchArgs {
    fn to_request(&self) -> anyhow::Result<SearchRequest> {
        let mut request = SearchRequest::new(self.lookfor.clone()).search_type(self.search_type);
        if !self.fields.is_empty() {
            request = request.fields(self.fields.iter().cloned());
        }
        if !self.filters.is_empty() {
            request = request.filters(self.filters.iter().cloned());
        }
        if !self.facets.is_empty() {
            request = request.facets(self.facets.iter().cloned());
        }
        request.sort = self.sort;
        request.page = self.page;
        request.limit = self.limit;
        request.language = self.lng;

        for raw in &self.params {
            let Some((key, value)) = raw.split_once('=') else {
                bail!("--param expects KEY=VALUE, got '{}'", raw);
            };
            let merged = match request.extra.shift_remove(key) {
                None => ParamValue::from(value),
                Some(ParamValue::Single(prev)) => ParamValue::Multi(vec![prev, value.to_string()]),
                Some(ParamValue::Multi(mut prev)) => {
                    prev.push(value.to_string());
                    ParamValue::Multi(prev)
                }
            };
            request.extra.insert(key.to_string(), merged);
        }
        Ok(request)
    }
}

fn print_json(value: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_count(result: &Value) {
    match finna_client::search::result_count(result) {
        Some(count) => println!("Search would have matched {} records", count),
        None => println!("Search response carried no resultCount"),
    }
}

fn run_demo(finna: &FinnaClient) -> anyhow::Result<()> {
    println!("Demonstrating usage of FinnaClient");
    println!();
    println!("Now we have a FinnaClient object: {}", finna);
    println!();

    println!("* Performing a general search");
    let result = finna.search(&SearchRequest::new("bicycle").limit(5))?;
    print_count(&result);
    for rec in records(&result) {
        println!("{}", rec);
    }
    println!();

    println!("* Performing a search for images available online");
    let result = finna.search(
        &SearchRequest::new("bicycle")
            .fields(["title", "images"])
            .filters(["format:0/Image/", "online_boolean:1"]),
    )?;
    print_count(&result);
    for rec in records(&result) {
        let title = rec.get("title").and_then(Value::as_str).unwrap_or("(untitled)");
        println!("Title: {}", title);
        if let Some(path) = rec
            .get("images")
            .and_then(Value::as_array)
            .and_then(|images| images.first())
            .and_then(Value::as_str)
        {
            println!("URL:   {}", image_url(path));
        }
        println!();
    }
    println!();

    println!("* Performing a book search by author, sorting results by date, oldest first");
    let result = finna.search(
        &SearchRequest::new("Topelius")
            .search_type(SearchType::Author)
            .fields(["title", "id", "year"])
            .filters(["format:0/Book/"])
            .sort(SortMethod::MainDateStrAsc)
            .limit(5),
    )?;
    print_count(&result);
    for rec in records(&result) {
        println!("{}", rec);
    }
    println!();

    println!("* Retrieving a single record");
    let rec = finna.get_record("fennica.431237", &RecordOptions::new())?;
    println!("{}", rec);
    println!();

    println!("* Retrieving multiple records");
    let recs = finna.get_records(
        &["fennica.431237", "alma.510296", "piki.916440"],
        &RecordOptions::new().fields(["id", "title"]),
    )?;
    for rec in recs {
        println!("{}", rec);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    finna_client::utils::init_logger();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }
    info!(api_base = %config.api_base, "Configuration loaded");

    let finna = FinnaClient::from_config(&config).context("Failed to create Finna client")?;

    match cli.command {
        Command::Search(args) => {
            let result = finna.search(&args.to_request()?)?;
            print_json(&result)?;
        }
        Command::Record { id, options } => {
            let record = finna.get_record(&id, &options.to_options())?;
            print_json(&record)?;
        }
        Command::Records { ids, options } => {
            let records = finna.get_records(&ids, &options.to_options())?;
            print_json(&Value::Array(records))?;
        }
        Command::Demo => run_demo(&finna)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_search() {
        let cli = Cli::try_parse_from([
            "finna", "search", "bicycle", "--type", "Title", "--field", "title", "--field", "id",
            "--sort", "main_date_str asc", "--limit", "5", "--lng", "en-gb",
        ])
        .unwrap();

        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        let request = args.to_request().unwrap();
        assert_eq!(request.lookfor, "bicycle");
        assert_eq!(request.search_type, SearchType::Title);
        assert_eq!(request.fields, Some(vec!["title".to_string(), "id".to_string()]));
        assert_eq!(request.sort, Some(SortMethod::MainDateStrAsc));
        assert_eq!(request.limit, Some(5));
        assert_eq!(request.language, Some(Language::EnGb));
        assert_eq!(request.filters, None);
    }

    #[test]
    fn test_cli_rejects_invalid_enumerations() {
        assert!(Cli::try_parse_from(["finna", "search", "x", "--type", "Everything"]).is_err());
        assert!(Cli::try_parse_from(["finna", "search", "x", "--sort", "newest"]).is_err());
        assert!(Cli::try_parse_from(["finna", "record", "a", "--lng", "de"]).is_err());
    }

    #[test]
    fn test_repeated_params_become_multi_value() {
        let cli = Cli::try_parse_from([
            "finna", "search", "--param", "facetFilters=a", "--param", "facetFilters=b",
            "--param", "prettyPrint=1",
        ])
        .unwrap();

        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        let request = args.to_request().unwrap();
        assert_eq!(
            request.extra.get("facetFilters"),
            Some(&ParamValue::Multi(vec!["a".to_string(), "b".to_string()]))
        );
        assert_eq!(request.extra.get("prettyPrint"), Some(&ParamValue::from("1")));
    }

    #[test]
    fn test_malformed_param() {
        let cli = Cli::try_parse_from(["finna", "search", "--param", "oops"]).unwrap();
        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert!(args.to_request().is_err());
    }

    #[test]
    fn test_records_requires_ids() {
        assert!(Cli::try_parse_from(["finna", "records"]).is_err());
        let cli = Cli::try_parse_from(["finna", "records", "a", "b", "--field", "id"]).unwrap();
        assert!(matches!(cli.command, Command::Records { ref ids, .. } if ids.len() == 2));
    }
}
