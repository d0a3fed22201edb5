#![deny(missing_docs)]

//! # Model Naming
//!
//! Deterministic names for type occurrences. The same name is the human label, the
//! registry key and the tail of every `$ref`, in both dialects.
//!
//! e.g. `Outer<Mid<Leaf>>` -> `OuterOfMidOfLeaf`, `Pair<A, B>` -> `PairOfAAndB`

use crate::types::TypeOccurrence;

/// Synthesizes the model name of an occurrence.
///
/// Two distinct user types sharing a simple name and identical argument chains collide.
pub fn model_name(occ: &TypeOccurrence) -> String {
    let mut name = String::new();
    push_model_name(occ, &mut name);
    name
}

fn push_model_name(occ: &TypeOccurrence, out: &mut String) {
    out.push_str(occ.simple_name());
    if !occ.is_parameterized() {
        return;
    }

    out.push_str("Of");
    for (i, arg) in occ.arguments().iter().enumerate() {
        if i > 0 {
            out.push_str("And");
        }
        push_model_name(arg, out);
    }
}
