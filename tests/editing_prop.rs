//! Property tests for the editing core
//!
//! Random edit sequences are checked against a plain `String` model, and
//! undoing everything must restore the starting text.

use codepad::buffer::{GapBuffer, Motion, TextBuffer};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

#[derive(Debug, Clone)]
enum Edit {
    Insert(String),
    Backspace,
    Delete,
    Move(Motion),
}

fn text_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(prop_oneof![Just('a'), Just('é'), Just('\n'), Just(' '), Just('字')], 0..24)
        .prop_map(|chars| chars.into_iter().collect())
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        text_strategy().prop_map(Edit::Insert),
        Just(Edit::Backspace),
        Just(Edit::Delete),
        Just(Edit::Move(Motion::Left)),
        Just(Edit::Move(Motion::Right)),
        Just(Edit::Move(Motion::Up)),
        Just(Edit::Move(Motion::Down)),
        Just(Edit::Move(Motion::LineStart)),
        Just(Edit::Move(Motion::BufferEnd)),
    ]
}

fn byte_index(s: &str, char_pos: usize) -> usize {
    s.char_indices().nth(char_pos).map(|(idx, _)| idx).unwrap_or(s.len())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 96, .. ProptestConfig::default() })]

    #[test]
    fn gap_buffer_matches_string_model(
        initial in text_strategy(),
        ops in proptest::collection::vec((0usize..64, text_strategy(), any::<bool>()), 0..16)
    ) {
        let mut buffer = GapBuffer::from_str(&initial);
        let mut model = initial.clone();

        for (pos, text, delete) in ops {
            let len = model.chars().count();
            if delete {
                if len == 0 {
                    continue;
                }
                let at = pos % len;
                let removed = buffer.delete(at).unwrap();
                let idx = byte_index(&model, at);
                prop_assert_eq!(model.remove(idx), removed);
            } else {
                let at = pos.min(len);
                buffer.insert_str(at, &text).unwrap();
                model.insert_str(byte_index(&model, at), &text);
            }
            prop_assert_eq!(buffer.len_chars(), model.chars().count());
        }

        prop_assert_eq!(buffer.to_string(), model);
    }

    #[test]
    fn undo_all_restores_initial_and_redo_all_restores_final(
        initial in text_strategy(),
        edits in proptest::collection::vec(edit_strategy(), 0..24)
    ) {
        let mut buffer = TextBuffer::from_str(&initial);

        for edit in edits {
            match edit {
                Edit::Insert(text) => buffer.insert_str(&text).unwrap(),
                Edit::Backspace => {
                    buffer.delete_backward().unwrap();
                }
                Edit::Delete => {
                    buffer.delete_forward().unwrap();
                }
                Edit::Move(motion) => buffer.move_cursor(motion),
            }
            prop_assert!(buffer.cursor().char_pos <= buffer.len_chars());
        }

        let edited = buffer.text();
        while buffer.undo().unwrap() {}
        prop_assert_eq!(buffer.text(), initial);

        while buffer.redo().unwrap() {}
        prop_assert_eq!(buffer.text(), edited);
    }
}
