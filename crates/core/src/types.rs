use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A named category grouping related glossary terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessDomain {
    pub id: i64,
    pub business_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_description: Option<String>,
}

/// A glossary entry as returned by `/api/business-glossary`.
///
/// `business_domain` references a domain by name only; nothing guarantees a
/// matching [`BusinessDomain`] exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessTerm {
    pub id: i64,
    pub term: String,
    /// `null` upstream decodes as an empty definition.
    #[serde(deserialize_with = "null_as_empty")]
    pub term_definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_domain: Option<String>,
    /// Stored as a JSON column upstream, so any JSON value may show up here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_context: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
}

impl BusinessTerm {
    /// Returns the usage context as display text.
    ///
    /// Strings are returned verbatim, `null` or a missing value yields an
    /// empty string and any other JSON value is rendered as compact JSON.
    pub fn context_text(&self) -> String {
        match &self.term_context {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Returns the owning domain name, or `N/A` when the term has none.
    pub fn domain_label(&self) -> &str {
        match self.business_domain.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "N/A",
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn domain_without_description_deserializes() {
        let domain: BusinessDomain =
            serde_json::from_value(json!({ "id": 3, "business_value": "Lending" }))
                .expect("domain");
        assert_eq!(domain.business_value, "Lending");
        assert!(domain.domain_description.is_none());
    }

    #[test]
    fn term_ignores_unknown_fields() {
        let term: BusinessTerm = serde_json::from_value(json!({
            "id": 7,
            "term": "SLA",
            "term_definition": "Service level agreement",
            "department_owner": "Ops",
            "confidence_score": 0.92
        }))
        .expect("term");
        assert_eq!(term.term, "SLA");
        assert_eq!(term.confidence_score, Some(0.92));
        assert!(term.business_domain.is_none());
    }

    #[test]
    fn term_accepts_null_definition_but_not_a_missing_one() {
        let term: BusinessTerm = serde_json::from_value(json!({
            "id": 1,
            "term": "KPI",
            "term_definition": null
        }))
        .expect("null definition");
        assert_eq!(term.term_definition, "");

        let missing: Result<BusinessTerm, _> =
            serde_json::from_value(json!({ "id": 1, "term": "KPI" }));
        assert!(missing.is_err());

        let wrong_type: Result<BusinessTerm, _> = serde_json::from_value(json!({
            "id": 1,
            "term": "KPI",
            "term_definition": 42
        }));
        assert!(wrong_type.is_err());
    }

    #[test]
    fn one_null_definition_keeps_the_whole_list() {
        let terms: Vec<BusinessTerm> = serde_json::from_value(json!([
            { "id": 1, "term": "SLA", "term_definition": "Service level agreement" },
            { "id": 2, "term": "ARR", "term_definition": null, "business_domain": "Sales" }
        ]))
        .expect("glossary list");

        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].term_definition, "Service level agreement");
        assert_eq!(terms[1].term, "ARR");
        assert_eq!(terms[1].term_definition, "");
        assert_eq!(terms[1].domain_label(), "Sales");
    }

    #[test]
    fn domain_label_falls_back_to_placeholder() {
        let mut term: BusinessTerm = serde_json::from_value(json!({
            "id": 1,
            "term": "KPI",
            "term_definition": "Key performance indicator"
        }))
        .expect("term");
        assert_eq!(term.domain_label(), "N/A");

        term.business_domain = Some(String::new());
        assert_eq!(term.domain_label(), "N/A");

        term.business_domain = Some("Finance".to_string());
        assert_eq!(term.domain_label(), "Finance");
    }

    #[test]
    fn context_text_handles_json_shapes() {
        let mut term: BusinessTerm = serde_json::from_value(json!({
            "id": 1,
            "term": "KPI",
            "term_definition": "Key performance indicator",
            "term_context": null
        }))
        .expect("term");
        assert_eq!(term.context_text(), "");

        term.term_context = Some(json!("Quarterly reporting"));
        assert_eq!(term.context_text(), "Quarterly reporting");

        term.term_context = Some(json!(["board", "audit"]));
        assert_eq!(term.context_text(), r#"["board","audit"]"#);
    }
}
