//! Presentation-facing views of a settlement.
//!
//! The engine computes in full f64 precision and never rounds; amounts are
//! rounded here, at the presentation boundary, to the currency's minor
//! units. These types are the wire shapes a front-end renders from.
use core::fmt;

use serde::{Deserialize, Serialize};

/// Currency used when rounding and formatting amounts.
///
/// The settlement book is effectively mono-currency (default `CNY`), but
/// the views model currency explicitly to keep the data model future-proof.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Cny,
}

impl Currency {
    /// Canonical currency code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Cny => "CNY",
        }
    }

    /// Symbol prefixed to rendered amounts.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Cny => "¥",
        }
    }

    /// Number of fraction digits used when formatting/parsing amounts.
    #[must_use]
    pub const fn minor_units(self) -> u8 {
        match self {
            Currency::Cny => 2,
        }
    }

    /// Rounds a raw engine amount to this currency's minor units, half
    /// away from zero.
    #[must_use]
    pub fn round(self, value: f64) -> f64 {
        let scale = 10f64.powi(i32::from(self.minor_units()));
        // `+ 0.0` folds -0.0 into 0.0 so it never renders as "-0.00".
        (value * scale).round() / scale + 0.0
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub mod settlement {
    use super::*;

    /// Per-member roll-up row.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MemberSummaryView {
        pub name: String,
        pub head_count: u32,
        pub paid: f64,
        pub owed: f64,
        /// Positive: the member is owed money. Negative: they owe.
        pub net: f64,
    }

    impl MemberSummaryView {
        #[must_use]
        pub fn new(summary: &engine::MemberSummary, currency: Currency) -> Self {
            Self {
                name: summary.name.clone(),
                head_count: summary.head_count,
                paid: currency.round(summary.paid),
                owed: currency.round(summary.owed),
                net: currency.round(summary.net),
            }
        }
    }

    /// One audited contribution line; negative amounts are the portion
    /// cancelled by the opposite direction.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransferDetailView {
        pub description: String,
        pub amount: f64,
    }

    impl TransferDetailView {
        #[must_use]
        pub fn new(detail: &engine::TransferDetail, currency: Currency) -> Self {
            Self {
                description: detail.description.clone(),
                amount: currency.round(detail.amount),
            }
        }
    }

    /// A transfer the group has to execute to settle up.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransferView {
        pub from: String,
        pub to: String,
        pub amount: f64,
        pub details: Vec<TransferDetailView>,
    }

    impl TransferView {
        #[must_use]
        pub fn new(transfer: &engine::MergedTransfer, currency: Currency) -> Self {
            Self {
                from: transfer.from.clone(),
                to: transfer.to.clone(),
                amount: currency.round(transfer.amount),
                details: transfer
                    .details
                    .iter()
                    .map(|detail| TransferDetailView::new(detail, currency))
                    .collect(),
            }
        }
    }

    /// Full settlement report, ready to serialize or render.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct SettlementResponse {
        pub currency: Currency,
        pub total_spent: f64,
        pub summaries: Vec<MemberSummaryView>,
        pub transfers: Vec<TransferView>,
    }

    impl SettlementResponse {
        /// Builds the default-currency view of a settlement.
        #[must_use]
        pub fn new(result: &engine::SettlementResult, total_spent: f64) -> Self {
            Self::with_currency(result, total_spent, Currency::default())
        }

        #[must_use]
        pub fn with_currency(
            result: &engine::SettlementResult,
            total_spent: f64,
            currency: Currency,
        ) -> Self {
            Self {
                currency,
                total_spent: currency.round(total_spent),
                summaries: result
                    .summaries
                    .iter()
                    .map(|summary| MemberSummaryView::new(summary, currency))
                    .collect(),
                transfers: result
                    .transfers
                    .iter()
                    .map(|transfer| TransferView::new(transfer, currency))
                    .collect(),
            }
        }
    }

    fn write_amount(f: &mut fmt::Formatter<'_>, currency: Currency, value: f64) -> fmt::Result {
        if value < 0.0 {
            write!(f, "-{}{:.2}", currency.symbol(), -value)
        } else {
            write!(f, "{}{:.2}", currency.symbol(), value)
        }
    }

    impl fmt::Display for SettlementResponse {
        /// Plain-text rendering: the summary block, then the transfer
        /// plan. A transfer's detail lines are printed only when more
        /// than one expense fed into it, matching how a breakdown is
        /// only interesting once netting happened.
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Total: ")?;
            write_amount(f, self.currency, self.total_spent)?;
            writeln!(f)?;

            for summary in &self.summaries {
                write!(f, "{} \u{00d7}{}: paid ", summary.name, summary.head_count)?;
                write_amount(f, self.currency, summary.paid)?;
                write!(f, ", owed ")?;
                write_amount(f, self.currency, summary.owed)?;
                write!(f, ", net ")?;
                if summary.net >= 0.0 {
                    write!(f, "+")?;
                }
                write_amount(f, self.currency, summary.net)?;
                writeln!(f)?;
            }

            if self.transfers.is_empty() {
                writeln!(f, "All settled, no transfers needed.")?;
                return Ok(());
            }
            for transfer in &self.transfers {
                write!(f, "{} \u{2192} {}: ", transfer.from, transfer.to)?;
                write_amount(f, self.currency, transfer.amount)?;
                writeln!(f)?;
                if transfer.details.len() > 1 {
                    for detail in &transfer.details {
                        write!(f, "  - {}: ", detail.description)?;
                        write_amount(f, self.currency, detail.amount)?;
                        writeln!(f)?;
                    }
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::settlement::SettlementResponse;
    use super::*;

    fn trip_result() -> engine::SettlementResult {
        let mut ledger = engine::Ledger::new();
        ledger.add_member("Alice", 0).unwrap();
        ledger.add_member("Bob", 0).unwrap();
        ledger.add_member("Carol", 1).unwrap();
        ledger
            .add_expense("Dinner", 100.0, "Alice", &["Alice", "Bob", "Carol"])
            .unwrap();
        ledger
            .add_expense("Taxi", 40.0, "Bob", &["Alice", "Bob"])
            .unwrap();
        ledger.settle().unwrap()
    }

    #[test]
    fn rounds_at_the_presentation_boundary() {
        let members = vec![
            engine::Member::new("Alice", 0).unwrap(),
            engine::Member::new("Bob", 0).unwrap(),
            engine::Member::new("Carol", 0).unwrap(),
        ];
        // 10 over three heads never lands on a cent boundary.
        let expenses = vec![
            engine::Expense::new(
                "Dinner",
                10.0,
                "Alice",
                vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string()],
            )
            .unwrap(),
        ];
        let result = engine::settle(&members, &expenses).unwrap();

        let response = SettlementResponse::new(&result, 10.0);

        let bob = &response.summaries[1];
        assert_eq!(bob.owed, 3.33);
        let transfer = &response.transfers[0];
        assert_eq!(transfer.amount, 3.33);
    }

    #[test]
    fn half_cents_round_away_from_zero() {
        assert_eq!(Currency::Cny.round(0.005), 0.01);
        assert_eq!(Currency::Cny.round(-0.005), -0.01);
        assert_eq!(Currency::Cny.round(45.004), 45.0);
        assert!(Currency::Cny.round(-1e-9).is_sign_positive());
    }

    #[test]
    fn wire_shape_is_stable() {
        let result = trip_result();
        let response = SettlementResponse::new(&result, 140.0);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["currency"], "CNY");
        assert_eq!(value["total_spent"], 140.0);
        assert_eq!(value["summaries"][2]["head_count"], 2);
        assert_eq!(value["transfers"][0]["from"], "Bob");
        assert_eq!(value["transfers"][0]["details"][1]["amount"], -20.0);
    }

    #[test]
    fn renders_the_transfer_plan() {
        let result = trip_result();
        let response = SettlementResponse::new(&result, 140.0);

        let rendered = response.to_string();
        assert_eq!(
            rendered,
            "Total: \u{a5}140.00\n\
             Alice \u{00d7}1: paid \u{a5}100.00, owed \u{a5}45.00, net +\u{a5}55.00\n\
             Bob \u{00d7}1: paid \u{a5}40.00, owed \u{a5}45.00, net -\u{a5}5.00\n\
             Carol \u{00d7}2: paid \u{a5}0.00, owed \u{a5}50.00, net -\u{a5}50.00\n\
             Bob \u{2192} Alice: \u{a5}5.00\n\
             \x20 - Dinner: \u{a5}25.00\n\
             \x20 - Taxi: -\u{a5}20.00\n\
             Carol \u{2192} Alice: \u{a5}50.00\n"
        );
    }
}
