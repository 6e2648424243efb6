use std::str::FromStr;

use crate::error::FieldError;

/// Review states the status API reports for a homework.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] =
        [HomeworkStatus::Approved, HomeworkStatus::Reviewing, HomeworkStatus::Rejected];

    pub fn as_api_str(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HomeworkStatus::ALL
            .into_iter()
            .find(|st| st.as_api_str() == s)
            .ok_or_else(|| FieldError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_status() {
        for st in HomeworkStatus::ALL {
            assert_eq!(st.as_api_str().parse::<HomeworkStatus>().unwrap(), st);
        }
    }

    #[test]
    fn status_match_is_case_sensitive() {
        let err = "Approved".parse::<HomeworkStatus>().unwrap_err();
        assert_eq!(err, FieldError::UnknownStatus("Approved".into()));
    }
}
