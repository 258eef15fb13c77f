pub mod prelude;
pub mod dsp {
    pub mod sinc;
    pub mod stream_operator;
    pub mod verification;
    pub mod windows;
    pub mod filters {
        pub mod firwin;
    }
    pub mod resampling {
        pub mod polyphase_integer_resampling;
        pub mod rate_conversion_filters;
    }
}
pub mod codegen {
    pub mod c_float_literal;
    pub mod table_generator;
}
