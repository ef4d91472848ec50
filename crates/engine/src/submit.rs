use std::collections::HashMap;

use api_types::expense::PaidBy;

/// Absolute tolerance when deciding whether a single payer covered the
/// whole total.
const SINGLE_PAYER_TOLERANCE: f64 = 0.01;

/// Chooses the storage encoding for a drafted payer map.
///
/// A single payer whose amount matches the total (within tolerance) is
/// written back in the legacy scalar form, keeping new records readable by
/// old clients. Anything else (multiple payers, no payers, or a single payer
/// whose amount diverges from the total) keeps the structured map form.
///
/// Drift between the share sum and the total is routed, never corrected.
pub fn encode_paid_by(paid_by: &HashMap<String, f64>, total: f64) -> PaidBy {
    if paid_by.len() == 1 {
        if let Some((id, paid)) = paid_by.iter().next() {
            if (paid - total).abs() <= SINGLE_PAYER_TOLERANCE {
                return PaidBy::Single(id.clone());
            }
        }
    }
    PaidBy::Shares(paid_by.clone())
}
