// Typed request options for record lookups and searches

use serde::Deserialize;

use super::payload::{ExtraParams, ParamValue, Payload};
use crate::types::{Language, SearchType, SortMethod};

/// Options shared by the single and batch record lookups.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecordOptions {
    /// Restricts which fields the server returns.
    pub fields: Option<Vec<String>>,
    #[serde(rename = "lng")]
    pub language: Option<Language>,
}

impl RecordOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub(crate) fn apply(&self, payload: &mut Payload) {
        payload.set_opt("field[]", self.fields.clone());
        payload.set_opt("lng", self.language.map(|l| l.as_str()));
    }
}

/// A search against `/search`.
///
/// Enumeration-typed fields can only hold members of their closed sets;
/// string input (CLI arguments, JSON) is validated while it is parsed, so an
/// invalid value never reaches the network.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free text; empty matches everything.
    pub lookfor: String,
    #[serde(rename = "type")]
    pub search_type: SearchType,
    pub fields: Option<Vec<String>>,
    pub filters: Option<Vec<String>>,
    pub facets: Option<Vec<String>>,
    /// Passed through to the API unchanged.
    pub facet_filters: Option<ParamValue>,
    pub sort: Option<SortMethod>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "lng")]
    pub language: Option<Language>,
    /// Merged last; overrides named parameters on collision.
    pub extra: ExtraParams,
}

impl SearchRequest {
    pub fn new(lookfor: impl Into<String>) -> Self {
        Self {
            lookfor: lookfor.into(),
            ..Self::default()
        }
    }

    pub fn search_type(mut self, search_type: SearchType) -> Self {
        self.search_type = search_type;
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn filters<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters = Some(filters.into_iter().map(Into::into).collect());
        self
    }

    pub fn facets<I, S>(mut self, facets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.facets = Some(facets.into_iter().map(Into::into).collect());
        self
    }

    pub fn facet_filters(mut self, facet_filters: impl Into<ParamValue>) -> Self {
        self.facet_filters = Some(facet_filters.into());
        self
    }

    pub fn sort(mut self, sort: SortMethod) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build the ordered query payload.
    pub fn to_payload(&self) -> Payload {
        let mut payload = Payload::new();
        payload
            .set("lookfor", self.lookfor.as_str())
            .set("type", self.search_type.as_str())
            .set_opt("field[]", self.fields.clone())
            .set_opt("filter[]", self.filters.clone())
            .set_opt("facet[]", self.facets.clone())
            .set_opt("facetFilters", self.facet_filters.clone())
            .set_opt("sort", self.sort.map(|s| s.as_str()))
            .set_opt("page", self.page)
            .set_opt("limit", self.limit)
            .set_opt("lng", self.language.map(|l| l.as_str()))
            .merge(&self.extra);
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(payload: &Payload) -> Vec<(String, String)> {
        payload.to_query_pairs()
    }

    fn has(pairs: &[(String, String)], key: &str, value: &str) -> bool {
        pairs.iter().any(|(k, v)| k == key && v == value)
    }

    #[test]
    fn test_default_search_payload() {
        let p = pairs(&SearchRequest::default().to_payload());
        assert_eq!(
            p,
            vec![
                ("lookfor".to_string(), String::new()),
                ("type".to_string(), "AllFields".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_search_payload() {
        let request = SearchRequest::new("Topelius")
            .search_type(SearchType::Author)
            .fields(["title", "id", "year"])
            .filters(["format:0/Book/"])
            .facets(["building"])
            .sort(SortMethod::MainDateStrAsc)
            .page(2)
            .limit(5)
            .language(Language::Sv);
        let p = pairs(&request.to_payload());

        assert!(has(&p, "lookfor", "Topelius"));
        assert!(has(&p, "type", "Author"));
        assert!(has(&p, "field[]", "title"));
        assert!(has(&p, "field[]", "id"));
        assert!(has(&p, "field[]", "year"));
        assert!(has(&p, "filter[]", "format:0/Book/"));
        assert!(has(&p, "facet[]", "building"));
        assert!(has(&p, "sort", "main_date_str asc"));
        assert!(has(&p, "page", "2"));
        assert!(has(&p, "limit", "5"));
        assert!(has(&p, "lng", "sv"));
        assert_eq!(p.iter().filter(|(k, _)| k == "field[]").count(), 3);
    }

    #[test]
    fn test_extra_overrides_named_parameter() {
        let request = SearchRequest::new("bicycle").extra("type", "Title");
        let payload = request.to_payload();

        assert_eq!(payload.get("type"), Some(&ParamValue::from("Title")));
        let types: Vec<_> = pairs(&payload).into_iter().filter(|(k, _)| k == "type").collect();
        assert_eq!(types.len(), 1);
    }

    #[test]
    fn test_facet_filters_pass_through() {
        let request = SearchRequest::new("").facet_filters(vec!["building:0/Helmet/", "format:0/Book/"]);
        let p = pairs(&request.to_payload());

        assert!(has(&p, "facetFilters", "building:0/Helmet/"));
        assert!(has(&p, "facetFilters", "format:0/Book/"));
    }

    #[test]
    fn test_record_options_payload() {
        let mut payload = Payload::new();
        payload.set("id", "fennica.431237");
        RecordOptions::new()
            .fields(["id", "title"])
            .language(Language::EnGb)
            .apply(&mut payload);
        let p = pairs(&payload);

        assert!(has(&p, "id", "fennica.431237"));
        assert!(has(&p, "field[]", "id"));
        assert!(has(&p, "field[]", "title"));
        assert!(has(&p, "lng", "en-gb"));
    }

    #[test]
    fn test_deserialize_request() {
        let request: SearchRequest = serde_json::from_str(
            r#"{"lookfor": "bicycle", "type": "Title", "sort": "title", "limit": 5, "lng": "fi",
                "extra": {"prettyPrint": "1"}}"#,
        )
        .unwrap();

        assert_eq!(request.lookfor, "bicycle");
        assert_eq!(request.search_type, SearchType::Title);
        assert_eq!(request.sort, Some(SortMethod::Title));
        assert_eq!(request.limit, Some(5));
        assert_eq!(request.language, Some(Language::Fi));
        assert_eq!(request.extra.get("prettyPrint"), Some(&ParamValue::from("1")));
    }

    #[test]
    fn test_deserialize_record_options_uses_lng() {
        let options: RecordOptions =
            serde_json::from_str(r#"{"fields": ["id", "title"], "lng": "en-gb"}"#).unwrap();

        assert_eq!(options, RecordOptions::new().fields(["id", "title"]).language(Language::EnGb));
    }

    #[test]
    fn test_deserialize_rejects_unknown_enum_values() {
        assert!(serde_json::from_str::<SearchRequest>(r#"{"type": "Everything"}"#).is_err());
        assert!(serde_json::from_str::<SearchRequest>(r#"{"sort": "newest"}"#).is_err());
        assert!(serde_json::from_str::<RecordOptions>(r#"{"lng": "de"}"#).is_err());
    }
}
