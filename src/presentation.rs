//! Freshness badge styling for the stock list.
//!
//! The only consumer-facing reflection of the expiry classification: each
//! status maps to a fixed foreground/background/border color triple the UI
//! applies verbatim. Closed over the four variants by construction.

use serde::Serialize;

use crate::models::BarcodeStatus;

/// Color triple for a freshness badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusStyle {
    pub foreground: &'static str,
    pub background: &'static str,
    pub border: &'static str,
}

/// Badge style for a freshness status.
///
/// Exhaustive match, no fallthrough arm: a fifth status cannot ship without a
/// style being chosen here first.
pub fn status_style(status: BarcodeStatus) -> StatusStyle {
    match status {
        BarcodeStatus::Safe => StatusStyle {
            foreground: "#166534",
            background: "#dcfce7",
            border: "#86efac",
        },
        BarcodeStatus::Warning => StatusStyle {
            foreground: "#92400e",
            background: "#fef3c7",
            border: "#fcd34d",
        },
        BarcodeStatus::Expired => StatusStyle {
            foreground: "#991b1b",
            background: "#fee2e2",
            border: "#fca5a5",
        },
        // Neutral grey: structurally unreadable codes, distinct from the
        // three freshness colors.
        BarcodeStatus::Invalid => StatusStyle {
            foreground: "#374151",
            background: "#f3f4f6",
            border: "#d1d5db",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_statuses_have_distinct_styles() {
        let styles = [
            status_style(BarcodeStatus::Safe),
            status_style(BarcodeStatus::Warning),
            status_style(BarcodeStatus::Expired),
            status_style(BarcodeStatus::Invalid),
        ];
        for (i, a) in styles.iter().enumerate() {
            for b in styles.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn invalid_maps_to_neutral_grey() {
        let style = status_style(BarcodeStatus::Invalid);
        assert_eq!(style.background, "#f3f4f6");
        assert_ne!(style, status_style(BarcodeStatus::Expired));
    }

    #[test]
    fn style_serializes_as_color_triple() {
        let json = serde_json::to_value(status_style(BarcodeStatus::Safe)).unwrap();
        assert_eq!(json["foreground"], "#166534");
        assert_eq!(json["background"], "#dcfce7");
        assert_eq!(json["border"], "#86efac");
    }
}
