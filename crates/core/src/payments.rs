//! Payments
//!
//! Payment methods, the fields each one collects, and the client-side checks run before a
//! simulated confirmation. Credentials are wiped from memory when dropped.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum mobile money PIN length.
pub const MIN_PIN_LENGTH: usize = 4;

/// Supported payment methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Card form.
    #[serde(rename = "credit-card")]
    CreditCard,

    /// PayPal login.
    #[serde(rename = "paypal")]
    PayPal,

    /// Apple Pay wallet.
    #[serde(rename = "apple-pay")]
    ApplePay,

    /// Google Pay wallet.
    #[serde(rename = "google-pay")]
    GooglePay,

    /// M-Pesa mobile money.
    #[serde(rename = "mpesa")]
    Mpesa,

    /// Airtel Money mobile money.
    #[serde(rename = "airtel-money")]
    AirtelMoney,
}

/// How a payment method is confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Card number, expiry, CVV and holder name.
    Card,

    /// Email and password.
    PayPal,

    /// Single confirmation tap.
    Wallet,

    /// Mobile number and PIN prompt.
    MobileMoney,
}

impl PaymentMethod {
    /// Every supported method, in display order.
    pub const ALL: [Self; 6] = [
        Self::CreditCard,
        Self::PayPal,
        Self::ApplePay,
        Self::GooglePay,
        Self::Mpesa,
        Self::AirtelMoney,
    ];

    /// Wire identifier.
    pub fn id(self) -> &'static str {
        match self {
            Self::CreditCard => "credit-card",
            Self::PayPal => "paypal",
            Self::ApplePay => "apple-pay",
            Self::GooglePay => "google-pay",
            Self::Mpesa => "mpesa",
            Self::AirtelMoney => "airtel-money",
        }
    }

    /// Label recorded on created orders.
    pub fn label(self) -> &'static str {
        match self {
            Self::CreditCard => "Credit Card",
            Self::PayPal => "PayPal",
            Self::ApplePay => "Apple Pay",
            Self::GooglePay => "Google Pay",
            Self::Mpesa => "M-Pesa",
            Self::AirtelMoney => "Airtel Money",
        }
    }

    /// Confirmation flow used by the method.
    pub fn kind(self) -> MethodKind {
        match self {
            Self::CreditCard => MethodKind::Card,
            Self::PayPal => MethodKind::PayPal,
            Self::ApplePay | Self::GooglePay => MethodKind::Wallet,
            Self::Mpesa | Self::AirtelMoney => MethodKind::MobileMoney,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unknown payment method identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}

/// Card form fields.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct CardDetails {
    /// Card number.
    pub number: String,

    /// Expiry, as typed (e.g. `12/27`).
    pub expiry: String,

    /// Security code.
    pub cvv: String,

    /// Name on card.
    pub holder: String,
}

impl CardDetails {
    fn last4(&self) -> String {
        let digits: Vec<char> = self.number.chars().filter(char::is_ascii_digit).collect();

        digits.iter().skip(digits.len().saturating_sub(4)).collect()
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("last4", &self.last4())
            .field("holder", &self.holder)
            .finish_non_exhaustive()
    }
}

/// PayPal demo login.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct PayPalCredentials {
    /// Account email.
    pub email: String,

    /// Account password.
    pub password: String,
}

impl fmt::Debug for PayPalCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayPalCredentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Mobile money prompt fields.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct MobileMoneyDetails {
    /// Number charged.
    pub mobile_number: String,

    /// PIN entered on the confirmation prompt.
    pub pin: String,
}

impl fmt::Debug for MobileMoneyDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MobileMoneyDetails")
            .field("mobile_number", &self.mobile_number)
            .finish_non_exhaustive()
    }
}

/// Method specific fields.
#[derive(Debug, Clone)]
pub enum PaymentDetails {
    /// Card form.
    Card(CardDetails),

    /// PayPal login.
    PayPal(PayPalCredentials),

    /// Wallets collect nothing.
    Wallet,

    /// Mobile money prompt.
    MobileMoney(MobileMoneyDetails),
}

impl PaymentDetails {
    /// Empty fields for a method kind.
    pub fn empty(kind: MethodKind) -> Self {
        match kind {
            MethodKind::Card => Self::Card(CardDetails::default()),
            MethodKind::PayPal => Self::PayPal(PayPalCredentials::default()),
            MethodKind::Wallet => Self::Wallet,
            MethodKind::MobileMoney => Self::MobileMoney(MobileMoneyDetails::default()),
        }
    }

    fn kind(&self) -> MethodKind {
        match self {
            Self::Card(_) => MethodKind::Card,
            Self::PayPal(_) => MethodKind::PayPal,
            Self::Wallet => MethodKind::Wallet,
            Self::MobileMoney(_) => MethodKind::MobileMoney,
        }
    }
}

/// Why a simulated payment didn't go through.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaymentFailure {
    /// One of the four card fields is blank.
    #[error("please fill in all card details")]
    IncompleteCard,

    /// PayPal email or password is blank.
    #[error("please enter your PayPal email and password")]
    IncompletePayPal,

    /// Mobile number is blank.
    #[error("please enter the mobile number to charge")]
    MissingMobileNumber,

    /// PIN shorter than [`MIN_PIN_LENGTH`].
    #[error("PIN must be at least {} digits", MIN_PIN_LENGTH)]
    PinTooShort,

    /// The fields don't belong to the selected method.
    #[error("payment details don't match {0}")]
    DetailsMismatch(PaymentMethod),

    /// Payment succeeded but the order service rejected the order.
    #[error("payment succeeded but the order could not be created: {0}")]
    OrderCreation(String),
}

/// The chosen payment method and whatever it has collected so far. Never persisted.
#[derive(Debug, Clone)]
pub struct PaymentSelection {
    method: PaymentMethod,
    details: PaymentDetails,
}

impl PaymentSelection {
    /// Select a method with empty fields.
    pub fn new(method: PaymentMethod) -> Self {
        Self {
            method,
            details: PaymentDetails::empty(method.kind()),
        }
    }

    /// Select a method with filled fields.
    pub fn with_details(method: PaymentMethod, details: PaymentDetails) -> Self {
        Self { method, details }
    }

    /// Card payment.
    pub fn card(details: CardDetails) -> Self {
        Self::with_details(PaymentMethod::CreditCard, PaymentDetails::Card(details))
    }

    /// Mobile money payment.
    pub fn mobile_money(method: PaymentMethod, details: MobileMoneyDetails) -> Self {
        Self::with_details(method, PaymentDetails::MobileMoney(details))
    }

    /// Selected method.
    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    /// Collected fields.
    pub fn details(&self) -> &PaymentDetails {
        &self.details
    }

    /// Mutable access for form edits.
    pub fn details_mut(&mut self) -> &mut PaymentDetails {
        &mut self.details
    }

    /// Fields the payment step needs before checkout may continue.
    ///
    /// This is the same shape of check for every method: cards need a number, mobile money needs
    /// a number to charge; PayPal and wallets collect their credentials at confirmation time.
    ///
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn check_step_fields(&self) -> Result<(), PaymentFailure> {
        self.ensure_kind()?;

        match &self.details {
            PaymentDetails::Card(card) if card.number.trim().is_empty() => {
                Err(PaymentFailure::IncompleteCard)
            }
            PaymentDetails::MobileMoney(mobile) if mobile.mobile_number.trim().is_empty() => {
                Err(PaymentFailure::MissingMobileNumber)
            }
            _ => Ok(()),
        }
    }

    /// Full confirmation checks for the selected method.
    ///
    /// # Errors
    ///
    /// Returns the reason the simulated payment fails.
    pub fn validate(&self) -> Result<(), PaymentFailure> {
        self.ensure_kind()?;

        match &self.details {
            PaymentDetails::Card(card) => {
                let fields = [&card.number, &card.expiry, &card.cvv, &card.holder];

                if fields.iter().any(|field| field.trim().is_empty()) {
                    return Err(PaymentFailure::IncompleteCard);
                }
            }
            PaymentDetails::PayPal(login) => {
                if login.email.trim().is_empty() || login.password.is_empty() {
                    return Err(PaymentFailure::IncompletePayPal);
                }
            }
            PaymentDetails::Wallet => {}
            PaymentDetails::MobileMoney(mobile) => {
                if mobile.mobile_number.trim().is_empty() {
                    return Err(PaymentFailure::MissingMobileNumber);
                }

                if mobile.pin.chars().count() < MIN_PIN_LENGTH {
                    return Err(PaymentFailure::PinTooShort);
                }
            }
        }

        Ok(())
    }

    fn ensure_kind(&self) -> Result<(), PaymentFailure> {
        if self.details.kind() == self.method.kind() {
            Ok(())
        } else {
            Err(PaymentFailure::DetailsMismatch(self.method))
        }
    }
}
