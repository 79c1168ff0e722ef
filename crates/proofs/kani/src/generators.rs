//! Generators for arbitrary inputs (for Kani)

#[cfg(kani)]
use crate::sanitizer::*;
#[cfg(kani)]
use kani::any;

#[cfg(kani)]
pub fn any_node() -> NodeModel {
    NodeModel {
        tag: any(),
        child_a: any(),
        child_b: any(),
        price: any(),
    }
}

#[cfg(kani)]
pub fn any_book() -> BookModel {
    BookModel {
        root: any(),
        leaf_count: any(),
        nodes: [any_node(), any_node(), any_node()],
    }
}

#[cfg(kani)]
pub fn any_scale_inputs() -> ScaleInputs {
    ScaleInputs {
        numerator: any(),
        denominator: any(),
        exponent: any(),
    }
}
