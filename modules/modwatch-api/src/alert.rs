use modwatch_core::Outcome;

/// Banner shown on a form page after a form submission redirects back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    Success,
    Blocked,
    Listed,
    Captcha,
    Error,
}

impl Alert {
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Self::Success),
            "blocked" => Some(Self::Blocked),
            "listed" => Some(Self::Listed),
            "captcha" => Some(Self::Captcha),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Blocked => "blocked",
            Self::Listed => "listed",
            Self::Captcha => "captcha",
            Self::Error => "error",
        }
    }

    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => Self::Success,
            Outcome::Blacklisted | Outcome::NotListed => Self::Blocked,
            Outcome::AlreadyListed | Outcome::AlreadyPending => Self::Listed,
        }
    }

    pub fn is_error(self) -> bool {
        self != Self::Success
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Success => "Submission received",
            _ => "Submission failed",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Success => {
                "Your submission was received. It might take a few weeks until it is reviewed."
            }
            Self::Blocked => {
                "Your submission failed because the site you're trying to submit is not allowed to be submitted."
            }
            Self::Listed => {
                "Your submission failed because the site you're trying to submit is already listed or under review."
            }
            Self::Captcha => "You have to complete the CAPTCHA challenge first.",
            Self::Error => "Something went wrong on our side. Please try again later.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_round_trip() {
        for alert in [Alert::Success, Alert::Blocked, Alert::Listed, Alert::Captcha, Alert::Error] {
            assert_eq!(Alert::from_query(alert.as_str()), Some(alert));
        }
        assert_eq!(Alert::from_query("bogus"), None);
    }

    #[test]
    fn outcomes_map_to_banners() {
        assert_eq!(Alert::from_outcome(Outcome::Success), Alert::Success);
        assert_eq!(Alert::from_outcome(Outcome::AlreadyListed), Alert::Listed);
        assert_eq!(Alert::from_outcome(Outcome::AlreadyPending), Alert::Listed);
        assert_eq!(Alert::from_outcome(Outcome::Blacklisted), Alert::Blocked);
        assert_eq!(Alert::from_outcome(Outcome::NotListed), Alert::Blocked);
    }
}
