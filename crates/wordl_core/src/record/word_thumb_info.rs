//! Thumbnail attached to a dictionary word.

use super::{push_number, push_ref, push_text, Record, SearchField};
use crate::types::{RecordId, RecordRef};
use serde::{Deserialize, Serialize};

/// Picture thumbnail for a [`super::WordInfo`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordThumbInfo {
    /// Record id.
    pub id: Option<RecordId>,
    /// Number of thumbs-up.
    pub thumb_num: Option<i32>,
    /// Picture location.
    pub pic_url: Option<String>,
    /// Thumbnail lookup id.
    pub thumb_lid: Option<String>,
    /// Owning word.
    pub word: Option<RecordRef>,
}

impl Record for WordThumbInfo {
    const COLLECTION: &'static str = "word-thumb-infos";
    const TABLE: &'static str = "word_thumb_info";
    const ENTITY_NAME: &'static str = "wordThumbInfo";

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn search_fields(&self) -> Vec<SearchField> {
        let mut fields = Vec::with_capacity(4);
        push_number(&mut fields, "thumbNum", self.thumb_num);
        push_text(&mut fields, "picUrl", &self.pic_url);
        push_text(&mut fields, "thumbLid", &self.thumb_lid);
        push_ref(&mut fields, "word", self.word);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_round_trips_as_object() {
        let json = r#"{"thumbNum":1,"picUrl":"AAAAAAAAAA","thumbLid":"AAAAAAAAAA","word":{"id":4}}"#;
        let record: WordThumbInfo = serde_json::from_str(json).unwrap();
        assert_eq!(record.word, Some(RecordRef::new(RecordId::new(4))));
        assert_eq!(record.thumb_num, Some(1));

        let fields = record.search_fields();
        assert!(fields.contains(&SearchField::new("word", "4")));
        assert!(fields.contains(&SearchField::new("thumbNum", "1")));
    }
}
