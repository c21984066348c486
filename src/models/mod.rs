// Model exports

/// Declares a closed enumeration whose wire form is a fixed display label.
macro_rules! label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_label(label: &str) -> Option<Self> {
                match label {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod domain;
pub mod profile;
pub mod requests;
pub mod responses;

pub use domain::{
    BenefitSize, BenefitTemplate, Category, Difficulty, ExternalRank, ExtractedBenefit,
    ScoredBenefit, ScoringPoints, SelectionPolicy, TargetGroups,
};
pub use profile::{
    AgeBracket, Education, IncomeBracket, MaritalStatus, Presence, ProfileError, ProfileInput,
    Region, UserProfile,
};
pub use requests::{IngestRequest, RecommendRequest};
pub use responses::{
    ErrorResponse, HealthResponse, IngestResponse, RecommendResponse, UpdateReport, UpdateStatus,
};
