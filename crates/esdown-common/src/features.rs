//! Language features recorded per script.
//!
//! The parser records which post-ES2015 constructs a script uses. Transform
//! passes consult the set to skip scripts they have nothing to do for, and
//! remove the features they eliminate so later passes and validators can
//! rely on their absence.

use bitflags::bitflags;

bitflags! {
    /// Set of language features present in one script.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FeatureSet: u32 {
        const CLASSES = 1 << 0;
        const ARROW_FUNCTIONS = 1 << 1;
        const LET_DECLARATIONS = 1 << 2;
        const CONST_DECLARATIONS = 1 << 3;
        const COMPUTED_PROPERTIES = 1 << 4;
        const SPREAD_EXPRESSIONS = 1 << 5;
        const DEFAULT_PARAMETERS = 1 << 6;
        const REST_PARAMETERS = 1 << 7;
        const CLASS_GETTER_SETTER = 1 << 8;
        const PUBLIC_CLASS_FIELDS = 1 << 9;
        const CLASS_STATIC_BLOCK = 1 << 10;
    }
}

impl FeatureSet {
    /// Features introduced after ES2021 that `esdown` knows how to lower.
    pub const ES2022_CLASS_MEMBERS: Self =
        Self::PUBLIC_CLASS_FIELDS.union(Self::CLASS_STATIC_BLOCK);

    /// Human-readable feature names, in bit order.
    #[must_use]
    pub fn feature_names(self) -> Vec<&'static str> {
        self.iter_names()
            .map(|(name, _)| match name {
                "CLASSES" => "classes",
                "ARROW_FUNCTIONS" => "arrow functions",
                "LET_DECLARATIONS" => "let declarations",
                "CONST_DECLARATIONS" => "const declarations",
                "COMPUTED_PROPERTIES" => "computed properties",
                "SPREAD_EXPRESSIONS" => "spread expressions",
                "DEFAULT_PARAMETERS" => "default parameters",
                "REST_PARAMETERS" => "rest parameters",
                "CLASS_GETTER_SETTER" => "class getters and setters",
                "PUBLIC_CLASS_FIELDS" => "public class fields",
                "CLASS_STATIC_BLOCK" => "class static blocks",
                other => other,
            })
            .collect()
    }
}
