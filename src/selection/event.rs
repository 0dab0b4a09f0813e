use super::model::{Confirmation, ItemId, Snapshot};
use std::convert::Infallible;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    ToggleAll,
    ToggleItem(ItemId),
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed(Snapshot),
    Confirmed(Confirmation),
}

impl FromStr for SelectionEvent {
    type Err = Infallible;

    /// `all` and `done` are reserved words; `item:<id>` reaches items that
    /// share their names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(id) = s.strip_prefix("item:") {
            return Ok(Self::ToggleItem(ItemId::new(id)));
        }
        Ok(match s {
            "all" => Self::ToggleAll,
            "done" => Self::Confirm,
            _ => Self::ToggleItem(ItemId::new(s)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reserved_words() {
        assert_eq!("all".parse::<SelectionEvent>().unwrap(), SelectionEvent::ToggleAll);
        assert_eq!("done".parse::<SelectionEvent>().unwrap(), SelectionEvent::Confirm);
        assert_eq!(" all ".parse::<SelectionEvent>().unwrap(), SelectionEvent::ToggleAll);
    }

    #[test]
    fn test_parse_item_ids() {
        assert_eq!(
            "page3".parse::<SelectionEvent>().unwrap(),
            SelectionEvent::ToggleItem(ItemId::new("page3"))
        );
        assert_eq!(
            "item:all".parse::<SelectionEvent>().unwrap(),
            SelectionEvent::ToggleItem(ItemId::new("all"))
        );
    }
}
