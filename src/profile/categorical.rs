//! Closed categorical domains of a customer profile. The string forms match the
//! dashboard options exactly and are the only accepted spellings.

use crate::error::ChurnError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = ChurnError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(ChurnError::invalid(
                        $field,
                        format!("unrecognized value {:?}", other),
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical!(Gender, "gender" {
    Male => "Male",
    Female => "Female",
    Other => "Other",
});

categorical!(Contract, "contract" {
    MonthToMonth => "Month-to-month",
    OneYear => "One year",
    TwoYear => "Two year",
});

categorical!(InternetService, "internet_service" {
    FiberOptic => "Fiber optic",
    Dsl => "DSL",
    No => "No",
});

categorical!(
    /// Subscription state of one add-on service.
    ServiceOption, "service_option" {
        Yes => "Yes",
        No => "No",
        NoInternetService => "No internet service",
    }
);

categorical!(PaymentMethod, "payment_method" {
    ElectronicCheck => "Electronic check",
    MailedCheck => "Mailed check",
    BankTransfer => "Bank transfer (automatic)",
    CreditCard => "Credit card (automatic)",
});

impl PaymentMethod {
    pub fn is_automatic(self) -> bool {
        self.as_str().contains("automatic")
    }
}

categorical!(
    /// The six optional services sold on top of an internet subscription.
    AddOnService, "add_on_service" {
        OnlineSecurity => "OnlineSecurity",
        OnlineBackup => "OnlineBackup",
        DeviceProtection => "DeviceProtection",
        TechSupport => "TechSupport",
        StreamingTv => "StreamingTV",
        StreamingMovies => "StreamingMovies",
    }
);

impl AddOnService {
    /// Profile field carrying this service's option.
    pub fn field(self) -> &'static str {
        match self {
            AddOnService::OnlineSecurity => "online_security",
            AddOnService::OnlineBackup => "online_backup",
            AddOnService::DeviceProtection => "device_protection",
            AddOnService::TechSupport => "tech_support",
            AddOnService::StreamingTv => "streaming_tv",
            AddOnService::StreamingMovies => "streaming_movies",
        }
    }

    /// Parse an option for this service, reporting errors against its own field.
    pub fn parse_option(self, raw: &str) -> Result<ServiceOption, ChurnError> {
        raw.parse::<ServiceOption>().map_err(|_| {
            ChurnError::invalid(self.field(), format!("unrecognized value {:?}", raw))
        })
    }
}
