//! Saving an unedited document
//!
//! Opening a file and saving it without edits must only drop trailing
//! whitespace; leading indentation and interior blank lines survive.

use codepad::{CodeEditor, EditorConfig};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

fn source_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![Just(' '), Just('\t'), Just('\n'), Just('x'), Just('='), Just('字')],
        0..60,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn unedited_save_only_trims_the_end(text in source_text()) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("source.py");
        fs::write(&path, &text).unwrap();

        let mut editor = CodeEditor::new(EditorConfig::default());
        editor.open_file(&path).unwrap();
        editor.save_file().unwrap();

        prop_assert_eq!(fs::read_to_string(&path).unwrap(), text.trim_end());
    }
}
