//! Fixed chat texts the loop sends when it has no verdict of its own.

use crate::error::PollError;

pub const NO_CHANGE: &str = "Статус работы пока не менялся.";

pub const FETCH_FAILED: &str = "Произошла ошибка при запросе к основному API Яндекс.Домашки";

pub const SHAPE_INVALID: &str = "Ответ от API Яндекс.Домашки не соответствует ожидаемому. \
     Выполнение программы продолжено, но возможно требуется вмешательство.";

/// Diagnostic shown to the user for a failed iteration.
pub fn for_error(err: &PollError) -> String {
    match err {
        PollError::Fetch(_) => FETCH_FAILED.to_string(),
        PollError::Shape(_) => SHAPE_INVALID.to_string(),
        PollError::Field(e) => format!("Сбой в работе программы: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, FieldError, ShapeError};

    #[test]
    fn fetch_and_shape_messages_are_stable() {
        // the text must not depend on the error detail or dedup breaks
        assert_eq!(for_error(&FetchError::Timeout.into()), FETCH_FAILED);
        assert_eq!(
            for_error(&FetchError::Status(reqwest::StatusCode::BAD_GATEWAY).into()),
            FETCH_FAILED
        );
        assert_eq!(for_error(&ShapeError::MissingKey.into()), SHAPE_INVALID);
        assert_eq!(for_error(&ShapeError::NotAMapping.into()), SHAPE_INVALID);
    }

    #[test]
    fn field_message_names_the_problem() {
        let msg = for_error(&FieldError::UnknownStatus("lost".into()).into());
        assert_eq!(msg, "Сбой в работе программы: Неизвестный статус домашней работы: lost");
    }

    #[test]
    fn shape_text_is_one_sentence_pair() {
        assert!(SHAPE_INVALID.contains("ожидаемому. Выполнение"));
    }
}
