//! Правила вывода статуса, типа и состояния из свободного текста.
//!
//! Every table is scanned in order and the LAST matching marker wins, so a
//! rule placed lower in a table overrides the ones above it.

use contracts::domain::a001_printer::{PrinterCondition, PrinterStatus, PrinterType};

pub struct TextRule<T> {
    pub marker: &'static str,
    pub value: T,
}

/// Matched against the lower-cased Rekond field
pub const STATUS_RULES: &[TextRule<PrinterStatus>] = &[
    TextRule {
        marker: "levererad",
        value: PrinterStatus::Delivered,
    },
    TextRule {
        marker: "inväntar",
        value: PrinterStatus::Pending,
    },
    TextRule {
        marker: "ej",
        value: PrinterStatus::Cancelled,
    },
];

/// Matched case-sensitively against "{brand} {model}"
pub const TYPE_RULES: &[TextRule<PrinterType>] = &[
    TextRule {
        marker: "WF-",
        value: PrinterType::Inkjet,
    },
    TextRule {
        marker: "IM",
        value: PrinterType::Multifunction,
    },
    TextRule {
        marker: "MP",
        value: PrinterType::Multifunction,
    },
    TextRule {
        marker: "Bizhub",
        value: PrinterType::Multifunction,
    },
    TextRule {
        marker: "Touchpanel",
        value: PrinterType::Touchpanel,
    },
];

/// Matched against the lower-cased Skick field
pub const CONDITION_RULES: &[TextRule<PrinterCondition>] = &[
    TextRule {
        marker: "ny",
        value: PrinterCondition::New,
    },
    TextRule {
        marker: "new",
        value: PrinterCondition::New,
    },
    TextRule {
        marker: "begagnad",
        value: PrinterCondition::Used,
    },
    TextRule {
        marker: "used",
        value: PrinterCondition::Used,
    },
    TextRule {
        marker: "såld",
        value: PrinterCondition::Sold,
    },
    TextRule {
        marker: "sold",
        value: PrinterCondition::Sold,
    },
];

fn last_match<T: Copy>(rules: &[TextRule<T>], text: &str) -> Option<T> {
    rules
        .iter()
        .filter(|rule| text.contains(rule.marker))
        .last()
        .map(|rule| rule.value)
}

pub fn infer_status(rekond: &str) -> PrinterStatus {
    last_match(STATUS_RULES, &rekond.to_lowercase()).unwrap_or(PrinterStatus::Available)
}

pub fn infer_type(brand: &str, model: &str) -> PrinterType {
    let full_model = format!("{} {}", brand, model);
    last_match(TYPE_RULES, full_model.trim()).unwrap_or(PrinterType::Printer)
}

pub fn infer_condition(skick: &str) -> PrinterCondition {
    last_match(CONDITION_RULES, &skick.to_lowercase()).unwrap_or(PrinterCondition::Used)
}
