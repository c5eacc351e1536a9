use serde::{Deserialize, Serialize};

/// Placeholder written into a showing when the source data omits a field.
pub const NOT_AVAILABLE: &str = "N/A";

/// One flat (movie, date, time, cinema) record from a schedule snapshot.
///
/// All four fields are always populated; missing `time`/`cinema_name` in the
/// source data are replaced with [`NOT_AVAILABLE`] during normalization, so
/// downstream code never sees an absent field.
///
/// Serialized field names are camelCase because the persisted snapshot and
/// diff artifacts are the compatibility surface consumed by other tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedShowing {
    pub movie_title: String,
    pub date: String,
    pub time: String,
    pub cinema_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_field_names() {
        let showing = NormalizedShowing {
            movie_title: "Dune".to_owned(),
            date: "2026-08-30".to_owned(),
            time: "21:30".to_owned(),
            cinema_name: "Milano Bicocca".to_owned(),
        };
        let json = serde_json::to_value(&showing).unwrap();
        assert_eq!(json["movieTitle"], "Dune");
        assert_eq!(json["cinemaName"], "Milano Bicocca");
        assert_eq!(json["date"], "2026-08-30");
        assert_eq!(json["time"], "21:30");
    }

    #[test]
    fn deserializes_artifact_shape() {
        let json = r#"{"movieTitle":"Dune","date":"2026-08-30","time":"N/A","cinemaName":"N/A"}"#;
        let showing: NormalizedShowing = serde_json::from_str(json).unwrap();
        assert_eq!(showing.movie_title, "Dune");
        assert_eq!(showing.time, NOT_AVAILABLE);
    }
}
