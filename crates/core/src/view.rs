use chrono::{DateTime, Utc};
use serde::Serialize;

/// Load state of a single list view.
///
/// A view starts in [`ViewState::Loading`] and settles exactly once, either
/// with the fetched records or with the error message of the failed fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewState<T> {
    Loading,
    Loaded {
        items: Vec<T>,
        fetched_at: DateTime<Utc>,
    },
    Failed {
        error: String,
        failed_at: DateTime<Utc>,
    },
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> ViewState<T> {
    /// Builds the settled state for a finished fetch.
    pub fn settle<E>(result: Result<Vec<T>, E>, now: DateTime<Utc>) -> Self
    where
        E: std::fmt::Display,
    {
        match result {
            Ok(items) => Self::Loaded {
                items,
                fetched_at: now,
            },
            Err(err) => Self::Failed {
                error: err.to_string(),
                failed_at: now,
            },
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns the loaded records, if any.
    pub fn items(&self) -> Option<&[T]> {
        match self {
            Self::Loaded { items, .. } => Some(items),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Label used for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Loaded { .. } => "loaded",
            Self::Failed { .. } => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn default_state_is_loading() {
        let state: ViewState<u32> = ViewState::default();
        assert!(state.is_loading());
        assert!(state.items().is_none());
        assert!(state.error().is_none());
    }

    #[test]
    fn settle_success_keeps_order() {
        let state = ViewState::settle(Ok::<_, String>(vec![3, 1, 2]), now());
        assert_eq!(state.items(), Some(&[3, 1, 2][..]));
        assert_eq!(state.as_str(), "loaded");
    }

    #[test]
    fn settle_error_keeps_message() {
        let state: ViewState<u32> = ViewState::settle(Err("API Error 500: boom"), now());
        assert_eq!(state.error(), Some("API Error 500: boom"));
        assert!(!state.is_loading());
    }

    #[test]
    fn serializes_with_state_tag() {
        let loading: ViewState<u32> = ViewState::Loading;
        assert_eq!(
            serde_json::to_value(&loading).expect("json"),
            json!({ "state": "loading" })
        );

        let loaded = ViewState::settle(Ok::<_, String>(vec![1]), now());
        assert_eq!(
            serde_json::to_value(&loaded).expect("json"),
            json!({
                "state": "loaded",
                "items": [1],
                "fetched_at": "2024-01-01T00:00:00Z"
            })
        );
    }
}
