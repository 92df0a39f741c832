//! Square-matrix arithmetic over generic numeric elements: a compile-time
//! sized variant inverted in place by Gauss-Jordan elimination, and a
//! runtime-sized variant built around cofactor expansion (determinant,
//! cofactor matrix, adjugate).

pub mod error;

pub mod matrix {
    pub mod element;
    pub mod matrix_dyn;
    pub mod matrix_fixed;
}

pub mod rings {
    pub mod rational;
}

pub mod utils;
