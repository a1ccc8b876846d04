//! Promotions
//!
//! Promo codes are evaluated against a small catalogue of rules. Every submission produces a
//! fresh [`PromoApplication`] which replaces whatever was applied before; discounts never stack.

use std::fmt;

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use smallvec::{SmallVec, smallvec};

use crate::discounts::{DiscountError, percent_of};

/// Code accepted by the default catalogue.
pub const DEMO_PROMO_CODE: &str = "SAVE10";

/// A single promo code rule.
#[derive(Debug, Clone)]
pub struct PromoRule {
    code: String,
    percent_off: Percentage,
    free_shipping: bool,
}

impl PromoRule {
    /// Create a rule granting `percent_off` of the subtotal.
    pub fn new(code: impl Into<String>, percent_off: Percentage) -> Self {
        Self {
            code: code.into(),
            percent_off,
            free_shipping: false,
        }
    }

    /// Also waive shipping when this rule applies.
    #[must_use]
    pub fn with_free_shipping(mut self) -> Self {
        self.free_shipping = true;
        self
    }

    /// The canonical code.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Case-insensitive exact match, ignoring surrounding whitespace.
    pub fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }
}

/// Outcome of a promo submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoFeedback {
    /// The code matched a rule.
    Applied,

    /// The code didn't match any rule.
    Invalid,
}

/// Result of evaluating a promo code against a subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct PromoApplication {
    /// Code as entered, trimmed.
    pub code: String,

    /// Discount amount, zero for invalid codes.
    pub discount: Money<'static, Currency>,

    /// Whether shipping is waived.
    pub free_shipping: bool,

    /// Success or failure.
    pub feedback: PromoFeedback,
}

impl PromoApplication {
    /// Check if the code was accepted.
    pub fn is_applied(&self) -> bool {
        self.feedback == PromoFeedback::Applied
    }

    /// Message shown next to the promo field.
    pub fn message(&self) -> String {
        match self.feedback {
            PromoFeedback::Applied => {
                format!("Promo code {} applied! You saved {}", self.code, self.discount)
            }
            PromoFeedback::Invalid => format!("Promo code {} is not valid", self.code),
        }
    }
}

impl fmt::Display for PromoApplication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Known promo rules.
#[derive(Debug, Clone)]
pub struct PromoCatalogue {
    rules: SmallVec<[PromoRule; 2]>,
}

impl Default for PromoCatalogue {
    fn default() -> Self {
        Self {
            rules: smallvec![PromoRule::new(DEMO_PROMO_CODE, Percentage::from(0.10))],
        }
    }
}

impl PromoCatalogue {
    /// Catalogue with exactly the given rules.
    pub fn with_rules(rules: impl IntoIterator<Item = PromoRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Find the rule matching `code`.
    pub fn find(&self, code: &str) -> Option<&PromoRule> {
        self.rules.iter().find(|rule| rule.matches(code))
    }

    /// Evaluate `code` against `subtotal`.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the percentage can't be applied to the subtotal.
    pub fn apply(
        &self,
        code: &str,
        subtotal: &Money<'static, Currency>,
    ) -> Result<PromoApplication, DiscountError> {
        let code = code.trim().to_string();

        let Some(rule) = self.find(&code) else {
            return Ok(PromoApplication {
                code,
                discount: Money::from_minor(0, subtotal.currency()),
                free_shipping: false,
                feedback: PromoFeedback::Invalid,
            });
        };

        Ok(PromoApplication {
            code,
            discount: percent_of(subtotal, &rule.percent_off)?,
            free_shipping: rule.free_shipping,
            feedback: PromoFeedback::Applied,
        })
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn demo_code_takes_ten_percent() -> TestResult {
        let subtotal = Money::from_minor(250_00, USD);

        let applied = PromoCatalogue::default().apply("SAVE10", &subtotal)?;

        assert!(applied.is_applied());
        assert_eq!(applied.discount, Money::from_minor(25_00, USD));
        assert!(!applied.free_shipping);

        Ok(())
    }

    #[test]
    fn matching_is_case_insensitive_and_trimmed() -> TestResult {
        let subtotal = Money::from_minor(100_00, USD);

        let applied = PromoCatalogue::default().apply("  save10 ", &subtotal)?;

        assert!(applied.is_applied());
        assert_eq!(applied.code, "save10");

        Ok(())
    }

    #[test]
    fn unknown_code_yields_zero_and_failure_message() -> TestResult {
        let subtotal = Money::from_minor(250_00, USD);

        let applied = PromoCatalogue::default().apply("SAVE20", &subtotal)?;

        assert_eq!(applied.feedback, PromoFeedback::Invalid);
        assert_eq!(applied.discount, Money::from_minor(0, USD));
        assert!(applied.message().contains("not valid"));

        Ok(())
    }

    #[test]
    fn partial_matches_are_rejected() -> TestResult {
        let subtotal = Money::from_minor(250_00, USD);

        let applied = PromoCatalogue::default().apply("SAVE1", &subtotal)?;

        assert!(!applied.is_applied());

        Ok(())
    }

    #[test]
    fn free_shipping_rules_carry_the_flag() -> TestResult {
        let catalogue = PromoCatalogue::with_rules([
            PromoRule::new("SHIPFREE", Percentage::from(0.0)).with_free_shipping()
        ]);

        let applied = catalogue.apply("shipfree", &Money::from_minor(10_00, USD))?;

        assert!(applied.free_shipping);
        assert_eq!(applied.discount, Money::from_minor(0, USD));

        Ok(())
    }
}
