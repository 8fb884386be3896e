use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default PIN of the demo account.
pub const DEFAULT_PIN: &str = "1234";

/// Euros received per dollar, in basis points (0.93).
const USD_TO_EUR_BP: u64 = 9_300;
const BP: u64 = 10_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Enter a positive amount.")]
    NotPositive,
    #[error("Invalid amount.")]
    InvalidAmount,
    #[error("Insufficient {0} funds!")]
    InsufficientFunds(Currency),
    #[error("Insufficient {0} funds to send.")]
    InsufficientToSend(Currency),
    #[error("Insufficient {0}!")]
    InsufficientToConvert(Currency),
    #[error("Please enter a Recipient Card Number.")]
    MissingCard,
    #[error("Error: Card number not found in database.")]
    UnknownCard,
    #[error("Wrong PIN.")]
    WrongPin,
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),
}

pub type Result<T> = std::result::Result<T, BankError>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
}

impl Currency {
    pub const ALL: [Self; 2] = [Self::Usd, Self::Eur];

    pub const fn code(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
        }
    }

    pub const fn sign(self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Self::Usd => Self::Eur,
            Self::Eur => Self::Usd,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BankError::UnknownCurrency(s.to_string()))
    }
}

/// Money in whole cents.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Parses a positive decimal amount with at most two fractional digits.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (whole, fraction) = input.split_once('.').unwrap_or((input, ""));

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty())
            || fraction.len() > 2
            || !all_digits(whole)
            || !all_digits(fraction)
        {
            return Err(BankError::NotPositive);
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| BankError::NotPositive)?
        };
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| BankError::NotPositive)? * 10,
            _ => fraction.parse().map_err(|_| BankError::NotPositive)?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .ok_or(BankError::NotPositive)?;
        if cents == 0 {
            return Err(BankError::NotPositive);
        }
        Ok(Self(cents))
    }

    fn convert(self, from: Currency) -> Self {
        let (num, den) = match from {
            Currency::Usd => (USD_TO_EUR_BP, BP),
            Currency::Eur => (BP, USD_TO_EUR_BP),
        };
        let (cents, num, den) = (u128::from(self.0), u128::from(num), u128::from(den));
        // round half up
        let converted = (cents * num * 2 + den) / (den * 2);
        Self(u64::try_from(converted).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Amount {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    pub usd: Amount,
    pub eur: Amount,
}

impl Balances {
    pub fn get(&self, currency: Currency) -> Amount {
        match currency {
            Currency::Usd => self.usd,
            Currency::Eur => self.eur,
        }
    }

    fn get_mut(&mut self, currency: Currency) -> &mut Amount {
        match currency {
            Currency::Usd => &mut self.usd,
            Currency::Eur => &mut self.eur,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Recipient {
    pub card: &'static str,
    pub name: &'static str,
}

pub const KNOWN_RECIPIENTS: &[Recipient] = &[
    Recipient { card: "1001", name: "Alice" },
    Recipient { card: "1002", name: "Teymur" },
    Recipient { card: "1003", name: "Vilnius tech" },
    Recipient { card: "1004", name: "Work" },
    Recipient { card: "5555", name: "Savings Account" },
];

/// Mock two-currency account. Nothing leaves process memory.
#[derive(Clone, Debug, PartialEq)]
pub struct BankAccount {
    balances: Balances,
    pin: String,
    recipients: &'static [Recipient],
}

impl Default for BankAccount {
    fn default() -> Self {
        Self::new()
    }
}

impl BankAccount {
    pub fn new() -> Self {
        Self::with_pin(DEFAULT_PIN)
    }

    pub fn with_pin(pin: impl Into<String>) -> Self {
        Self {
            balances: Balances::default(),
            pin: pin.into(),
            recipients: KNOWN_RECIPIENTS,
        }
    }

    pub fn verify_pin(&self, pin: &str) -> bool {
        self.pin == pin
    }

    pub fn login(&self, pin: &str) -> Result<&'static str> {
        if self.verify_pin(pin) {
            Ok("System Ready.")
        } else {
            log::debug!("rejected pin attempt");
            Err(BankError::WrongPin)
        }
    }

    pub fn balances(&self) -> Balances {
        self.balances
    }

    pub fn recipient(&self, card: &str) -> Option<Recipient> {
        self.recipients.iter().copied().find(|r| r.card == card)
    }

    pub fn deposit(&mut self, amount: Amount, currency: Currency) -> Result<String> {
        let amount = Self::check_amount(amount)?;
        let balance = self.balances.get_mut(currency);
        balance.0 = balance.0.checked_add(amount.0).ok_or(BankError::InvalidAmount)?;
        Ok(format!("Deposited {} {}", amount, currency))
    }

    pub fn withdraw(&mut self, amount: Amount, currency: Currency) -> Result<String> {
        let amount = Self::check_amount(amount)?;
        self.debit(amount, currency, BankError::InsufficientFunds)?;
        Ok(format!("Withdrew {} {}", amount, currency))
    }

    pub fn send_money(&mut self, amount: Amount, currency: Currency, card: &str) -> Result<String> {
        let card = card.trim();
        if card.is_empty() {
            return Err(BankError::MissingCard);
        }
        let recipient = self.recipient(card).ok_or(BankError::UnknownCard)?;
        let amount = Self::check_amount(amount)?;
        self.debit(amount, currency, BankError::InsufficientToSend)?;

        log::debug!("sent {} {} to card {}", amount, currency, card);
        Ok(format!(
            "Success! Sent {} {} to {} (Card {}).",
            amount, currency, recipient.name, recipient.card
        ))
    }

    /// Converts `amount` out of `from` into the other currency.
    pub fn transfer(&mut self, amount: Amount, from: Currency) -> Result<String> {
        let amount = Self::check_amount(amount)?;
        let to = from.other();
        let received = amount.convert(from);

        self.debit(amount, from, BankError::InsufficientToConvert)?;
        let target = self.balances.get_mut(to);
        target.0 = target.0.saturating_add(received.0);

        Ok(format!("Converted {} {} to {} {}.", amount, from, received, to))
    }

    fn check_amount(amount: Amount) -> Result<Amount> {
        if amount == Amount::ZERO {
            Err(BankError::InvalidAmount)
        } else {
            Ok(amount)
        }
    }

    fn debit(
        &mut self,
        amount: Amount,
        currency: Currency,
        short: fn(Currency) -> BankError,
    ) -> Result<()> {
        let balance = self.balances.get_mut(currency);
        balance.0 = balance.0.checked_sub(amount.0).ok_or(short(currency))?;
        Ok(())
    }
}
