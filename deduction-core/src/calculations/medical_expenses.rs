//! Medical-expense deduction (医療費控除) worksheet calculations.
//!
//! This module implements the medical-expense deduction from the Japanese
//! income tax rules, which allows expenses paid for medical care during the
//! year to be deducted from taxable income, net of insurance compensation
//! and an income-dependent threshold.
//!
//! # Worksheet Structure
//!
//! The deduction is computed in three steps:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Net expenses: medical expenses paid minus insurance compensation (not below ¥0) |
//! | 2    | Income threshold: ¥100,000, or total income × 5% (rounded up) when total income is under ¥2,000,000 |
//! | 3    | Deduction: Step 1 minus Step 2, clamped to [¥0, ¥2,000,000] |
//!
//! The 5% threshold rounds **up** to the next whole yen; at exactly
//! ¥2,000,000 of total income the flat ¥100,000 threshold applies (the
//! comparison is strictly "less than").
//!
//! # References
//!
//! - <https://www.nta.go.jp/taxes/shiraberu/taxanswer/shotoku/1120.htm>
//! - <https://www.nta.go.jp/publication/pamph/pdf/iryoukoujyo_meisai.pdf>
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use deduction_core::calculations::{MedicalDeductionConfig, MedicalDeductionWorksheet};
//!
//! let worksheet = MedicalDeductionWorksheet::new(MedicalDeductionConfig::default());
//!
//! let result = worksheet.calculate(
//!     dec!(200000),   // paid_expenses
//!     dec!(0),        // insurance_reimbursement
//!     dec!(3000000),  // total_income
//! ).unwrap();
//!
//! assert_eq!(result.deduction, dec!(100000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::{max, round_up_to_yen};

/// Errors that can occur during medical-expense deduction calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MedicalDeductionError {
    /// The income coefficient must be between 0 and 1 (exclusive of 0).
    #[error("income coefficient must be between 0 and 1, got {0}")]
    InvalidIncomeCoefficient(Decimal),

    /// The income border must be positive.
    #[error("income border must be positive, got {0}")]
    InvalidIncomeBorder(Decimal),

    /// The flat threshold must be non-negative.
    #[error("flat threshold must be non-negative, got {0}")]
    InvalidFlatThreshold(Decimal),

    /// The deduction cap must be positive.
    #[error("deduction cap must be positive, got {0}")]
    InvalidDeductionCap(Decimal),

    /// Medical expenses paid must be non-negative.
    #[error("paid expenses must be non-negative, got {0}")]
    NegativePaidExpenses(Decimal),

    /// Insurance reimbursement must be non-negative.
    #[error("insurance reimbursement must be non-negative, got {0}")]
    NegativeInsuranceReimbursement(Decimal),

    /// Total income must be non-negative.
    #[error("total income must be non-negative, got {0}")]
    NegativeTotalIncome(Decimal),
}

/// Configuration parameters for the medical-expense deduction.
///
/// These are statutory values that could change with tax reform; the
/// [`Default`] implementation carries the current statute.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use deduction_core::calculations::MedicalDeductionConfig;
///
/// let config = MedicalDeductionConfig::default();
///
/// assert_eq!(config.income_coefficient, dec!(0.05));
/// assert_eq!(config.income_border, dec!(2000000));
/// assert_eq!(config.flat_threshold, dec!(100000));
/// assert_eq!(config.deduction_cap, dec!(2000000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalDeductionConfig {
    /// Coefficient applied to total income below the border (Step 2 multiplier).
    ///
    /// Statutory value is 5%.
    pub income_coefficient: Decimal,

    /// Total income below which the percentage threshold applies (Step 2).
    ///
    /// Statutory value is ¥2,000,000. The comparison is strict: at exactly
    /// this income the flat threshold applies.
    pub income_border: Decimal,

    /// Flat threshold subtracted when total income is at or above the border.
    ///
    /// Statutory value is ¥100,000.
    pub flat_threshold: Decimal,

    /// Maximum deduction amount (Step 3 cap).
    ///
    /// Statutory value is ¥2,000,000.
    pub deduction_cap: Decimal,
}

impl Default for MedicalDeductionConfig {
    fn default() -> Self {
        Self {
            income_coefficient: Decimal::new(5, 2),
            income_border: Decimal::new(2_000_000, 0),
            flat_threshold: Decimal::new(100_000, 0),
            deduction_cap: Decimal::new(2_000_000, 0),
        }
    }
}

impl MedicalDeductionConfig {
    /// Validates the configuration values.
    ///
    /// Returns an error if any configuration value is outside its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`MedicalDeductionError`] if:
    /// - `income_coefficient` is not in (0, 1]
    /// - `income_border` is not positive
    /// - `flat_threshold` is negative
    /// - `deduction_cap` is not positive
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use deduction_core::calculations::{MedicalDeductionConfig, MedicalDeductionError};
    ///
    /// let invalid_config = MedicalDeductionConfig {
    ///     income_coefficient: dec!(1.5),
    ///     ..MedicalDeductionConfig::default()
    /// };
    ///
    /// let result = invalid_config.validate();
    /// assert_eq!(result, Err(MedicalDeductionError::InvalidIncomeCoefficient(dec!(1.5))));
    /// ```
    pub fn validate(&self) -> Result<(), MedicalDeductionError> {
        if self.income_coefficient <= Decimal::ZERO || self.income_coefficient > Decimal::ONE {
            return Err(MedicalDeductionError::InvalidIncomeCoefficient(
                self.income_coefficient,
            ));
        }
        if self.income_border <= Decimal::ZERO {
            return Err(MedicalDeductionError::InvalidIncomeBorder(
                self.income_border,
            ));
        }
        if self.flat_threshold < Decimal::ZERO {
            return Err(MedicalDeductionError::InvalidFlatThreshold(
                self.flat_threshold,
            ));
        }
        if self.deduction_cap <= Decimal::ZERO {
            return Err(MedicalDeductionError::InvalidDeductionCap(
                self.deduction_cap,
            ));
        }
        Ok(())
    }
}

/// Result of the medical-expense deduction calculation.
///
/// Contains the deduction amount along with intermediate values for
/// transparency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalDeductionResult {
    /// Expenses remaining after insurance compensation (Step 1).
    ///
    /// Paid expenses minus reimbursement, floored at zero.
    pub net_expenses: Decimal,

    /// The threshold subtracted from net expenses (Step 2).
    ///
    /// Either the flat ¥100,000 or 5% of total income rounded up,
    /// depending on which side of the income border the taxpayer falls.
    pub income_threshold: Decimal,

    /// The deduction amount (Step 3).
    ///
    /// Net expenses minus the threshold, clamped to [¥0, cap].
    pub deduction: Decimal,

    /// Indicates whether the deduction was limited by the statutory cap.
    pub capped: bool,
}

/// Calculator for the medical-expense deduction worksheet.
///
/// Encapsulates the statutory configuration and computes the deduction from
/// the three amounts on the worksheet. Stateless apart from the immutable
/// config, so a single instance can be shared freely across threads.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use deduction_core::calculations::{MedicalDeductionConfig, MedicalDeductionWorksheet};
///
/// let worksheet = MedicalDeductionWorksheet::new(MedicalDeductionConfig::default());
///
/// // ¥1,000,000 paid, no reimbursement, ¥1,000,000 total income
/// let result = worksheet.calculate(dec!(1000000), dec!(0), dec!(1000000)).unwrap();
///
/// // Threshold: 1,000,000 × 5% = ¥50,000
/// assert_eq!(result.income_threshold, dec!(50000));
/// assert_eq!(result.deduction, dec!(950000));
/// ```
#[derive(Debug, Clone)]
pub struct MedicalDeductionWorksheet {
    config: MedicalDeductionConfig,
}

impl MedicalDeductionWorksheet {
    /// Creates a new worksheet calculator with the given configuration.
    pub fn new(config: MedicalDeductionConfig) -> Self {
        Self { config }
    }

    /// Calculates the medical-expense deduction and returns the result.
    ///
    /// This is the main entry point. It validates the configuration, rejects
    /// negative amounts, performs the three worksheet steps, and returns the
    /// deduction together with intermediate values.
    ///
    /// # Arguments
    ///
    /// * `paid_expenses` - Medical expenses paid during the year (Step 1)
    /// * `insurance_reimbursement` - Amount compensated by insurance or
    ///   benefits (Step 1)
    /// * `total_income` - The taxpayer's total income for the year (Step 2)
    ///
    /// # Returns
    ///
    /// Returns [`MedicalDeductionResult`] with the deduction amount, always
    /// within `[0, deduction_cap]`.
    ///
    /// # Errors
    ///
    /// Returns [`MedicalDeductionError`] if the configuration is invalid or
    /// any amount is negative. Over non-negative amounts and a valid
    /// configuration the calculation never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use deduction_core::calculations::{MedicalDeductionConfig, MedicalDeductionWorksheet};
    ///
    /// let worksheet = MedicalDeductionWorksheet::new(MedicalDeductionConfig::default());
    ///
    /// // ¥50,000 of the ¥200,000 paid was covered by insurance
    /// let result = worksheet.calculate(dec!(200000), dec!(50000), dec!(3000000)).unwrap();
    ///
    /// assert_eq!(result.net_expenses, dec!(150000));
    /// assert_eq!(result.income_threshold, dec!(100000));
    /// assert_eq!(result.deduction, dec!(50000));
    /// ```
    pub fn calculate(
        &self,
        paid_expenses: Decimal,
        insurance_reimbursement: Decimal,
        total_income: Decimal,
    ) -> Result<MedicalDeductionResult, MedicalDeductionError> {
        self.config.validate()?;

        if paid_expenses < Decimal::ZERO {
            return Err(MedicalDeductionError::NegativePaidExpenses(paid_expenses));
        }
        if insurance_reimbursement < Decimal::ZERO {
            return Err(MedicalDeductionError::NegativeInsuranceReimbursement(
                insurance_reimbursement,
            ));
        }
        if total_income < Decimal::ZERO {
            return Err(MedicalDeductionError::NegativeTotalIncome(total_income));
        }

        // Step 1: Expenses net of insurance compensation
        let net_expenses = self.net_expenses(paid_expenses, insurance_reimbursement);

        // Step 2: Income-dependent threshold
        let income_threshold = self.income_threshold(total_income);

        // Step 3: Deduction, clamped to [0, cap]
        let raw = net_expenses - income_threshold;
        let capped = raw > self.config.deduction_cap;
        if capped {
            warn!(
                raw = %raw,
                deduction_cap = %self.config.deduction_cap,
                "Deduction limited by statutory cap"
            );
        }
        let deduction = max(Decimal::ZERO, raw.min(self.config.deduction_cap));

        Ok(MedicalDeductionResult {
            net_expenses,
            income_threshold,
            deduction,
            capped,
        })
    }

    /// Calculates expenses net of insurance compensation (Step 1).
    ///
    /// Subtracts the reimbursement from the expenses paid. Reimbursement in
    /// excess of the expenses does not carry over; the result floors at zero.
    fn net_expenses(
        &self,
        paid_expenses: Decimal,
        insurance_reimbursement: Decimal,
    ) -> Decimal {
        let net = paid_expenses - insurance_reimbursement;
        if net < Decimal::ZERO {
            warn!(
                paid_expenses = %paid_expenses,
                insurance_reimbursement = %insurance_reimbursement,
                "Reimbursement exceeds paid expenses; net expenses floored at zero"
            );
            return Decimal::ZERO;
        }
        net
    }

    /// Calculates the income-dependent threshold (Step 2).
    ///
    /// Below the income border the threshold is total income times the income
    /// coefficient, rounded up to the next whole yen. At or above the border
    /// the flat threshold applies; the comparison is strictly "less than".
    fn income_threshold(
        &self,
        total_income: Decimal,
    ) -> Decimal {
        if total_income < self.config.income_border {
            round_up_to_yen(total_income * self.config.income_coefficient)
        } else {
            self.config.flat_threshold
        }
    }
}
