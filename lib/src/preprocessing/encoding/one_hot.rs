//! One-hot encoding over a closed category.

use crate::preprocessing::encoding::OrdinalCategory;

/// One-hot vector for `value`: one slot per variant, in code order, with a
/// single `1.0` at the variant's code.
pub fn one_hot<C: OrdinalCategory>(value: C) -> Vec<f64> {
    let mut encoded = vec![0.0; C::ALL.len()];
    encoded[value.code() as usize] = 1.0;
    encoded
}
