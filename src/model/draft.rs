use crate::model::date_option::{encode_date, encode_time_slot};
use crate::model::types::*;
use chrono::{NaiveDate, NaiveTime};

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";
const INPUT_TIME_FORMAT: &str = "%H:%M";

/// One row of the create poll form, as typed into the date and time inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionDraft {
    pub date: String,
    pub start: String,
    pub end: String,
}

impl OptionDraft {
    pub fn date(date: &str) -> Self {
        Self {
            date: date.to_string(),
            ..Default::default()
        }
    }

    pub fn time_slot(date: &str, start: &str, end: &str) -> Self {
        Self {
            date: date.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    /// Stored option value: a plain date, or a time slot when both times are set.
    pub fn encode(&self) -> Result<String, Error> {
        let date = NaiveDate::parse_from_str(self.date.trim(), INPUT_DATE_FORMAT)
            .map_err(|_| Error::Validation(format!("{:?} is not a date", self.date)))?;
        match (self.start.trim(), self.end.trim()) {
            ("", "") => Ok(encode_date(date)),
            ("", _) | (_, "") => Err(Error::Validation(
                "a time slot needs both a start and an end".to_string(),
            )),
            (start, end) => {
                let start = date.and_time(parse_time(start)?);
                let end = date.and_time(parse_time(end)?);
                if end <= start {
                    return Err(Error::Validation(
                        "a time slot must end after it starts".to_string(),
                    ));
                }
                Ok(encode_time_slot(start, end))
            }
        }
    }
}

fn parse_time(time: &str) -> Result<NaiveTime, Error> {
    NaiveTime::parse_from_str(time, INPUT_TIME_FORMAT)
        .map_err(|_| Error::Validation(format!("{time:?} is not a time")))
}

/// State of the create poll form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDraft {
    pub title: String,
    pub location: String,
    pub description: String,
    pub time_zone: Option<String>,
    pub options: Vec<OptionDraft>,
}

impl Default for PollDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            location: String::new(),
            description: String::new(),
            time_zone: None,
            options: vec![OptionDraft::default()],
        }
    }
}

fn optional(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

impl PollDraft {
    pub fn add_option(&mut self) {
        self.options.push(OptionDraft::default());
    }

    /// The last remaining row is never removed.
    pub fn remove_option(&mut self, index: usize) {
        if self.options.len() > 1 && index < self.options.len() {
            self.options.remove(index);
        }
    }

    pub fn to_new_poll(&self) -> Result<NewPoll, Error> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("title is required".to_string()));
        }
        let options = self
            .options
            .iter()
            .map(OptionDraft::encode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NewPoll {
            title: self.title.trim().to_string(),
            description: optional(&self.description),
            location: optional(&self.location),
            time_zone: self.time_zone.clone(),
            options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_dates_and_slots() {
        assert_eq!(OptionDraft::date("2022-03-14").encode().unwrap(), "2022-03-14");
        assert_eq!(
            OptionDraft::time_slot("2022-03-14", "08:00", "09:30")
                .encode()
                .unwrap(),
            "2022-03-14T08:00:00/2022-03-14T09:30:00"
        );
    }

    #[test]
    fn rejects_half_and_backwards_slots() {
        assert!(OptionDraft::time_slot("2022-03-14", "08:00", "").encode().is_err());
        assert!(OptionDraft::time_slot("2022-03-14", "10:00", "09:00").encode().is_err());
        assert!(OptionDraft::date("14.03.2022").encode().is_err());
    }

    #[test]
    fn builds_new_poll() {
        let draft = PollDraft {
            title: " Team dinner ".into(),
            location: "  ".into(),
            description: "Bring snacks".into(),
            time_zone: Some("Europe/Berlin".into()),
            options: vec![
                OptionDraft::date("2022-03-14"),
                OptionDraft::time_slot("2022-03-15", "18:00", "20:00"),
            ],
        };
        let poll = draft.to_new_poll().unwrap();
        assert_eq!(poll.title, "Team dinner");
        assert_eq!(poll.location, None);
        assert_eq!(poll.description.as_deref(), Some("Bring snacks"));
        assert_eq!(poll.options.len(), 2);
    }

    #[test]
    fn keeps_one_option_row() {
        let mut draft = PollDraft::default();
        draft.remove_option(0);
        assert_eq!(draft.options.len(), 1);
        draft.add_option();
        draft.remove_option(0);
        assert_eq!(draft.options.len(), 1);
        assert!(PollDraft::default().to_new_poll().is_err());
    }
}
