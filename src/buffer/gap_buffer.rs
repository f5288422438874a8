//! ギャップバッファ実装
//!
//! カーソル付近にギャップ（空き領域）を保持し、連続した挿入・削除を高速化する。
//! 位置はすべて文字インデックスで扱う。

use crate::buffer::BufferError;

const DEFAULT_GAP_CAPACITY: usize = 1024;
const MIN_GAP_RESERVE: usize = 256;

/// ギャップバッファ構造体
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// 内部バッファ（ギャップ部分は '\0' で埋める）
    buffer: Vec<char>,
    /// ギャップの開始位置
    gap_start: usize,
    /// ギャップの終了位置（排他的）
    gap_end: usize,
}

impl GapBuffer {
    /// 新しい空のギャップバッファを作成
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_GAP_CAPACITY)
    }

    /// 指定容量で新しいギャップバッファを作成
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec!['\0'; capacity],
            gap_start: 0,
            gap_end: capacity,
        }
    }

    /// 文字列からギャップバッファを作成（ギャップは末尾）
    pub fn from_str(s: &str) -> Self {
        let mut buffer: Vec<char> = s.chars().collect();
        let len = buffer.len();
        let gap = (len / 4).max(MIN_GAP_RESERVE);
        buffer.resize(len + gap, '\0');

        Self {
            buffer,
            gap_start: len,
            gap_end: len + gap,
        }
    }

    /// 現在のギャップサイズ
    pub fn gap_size(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// 有効な文字数
    pub fn len_chars(&self) -> usize {
        self.buffer.len() - self.gap_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// 全テキストを文字列として取得
    pub fn to_string(&self) -> String {
        self.buffer[..self.gap_start]
            .iter()
            .chain(self.buffer[self.gap_end..].iter())
            .collect()
    }

    /// 指定位置の文字
    pub fn char_at(&self, pos: usize) -> Option<char> {
        if pos >= self.len_chars() {
            return None;
        }
        let index = if pos < self.gap_start { pos } else { pos + self.gap_size() };
        Some(self.buffer[index])
    }

    /// 文字のイテレータ
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.buffer[..self.gap_start]
            .iter()
            .chain(self.buffer[self.gap_end..].iter())
            .copied()
    }

    /// 指定範囲のテキストを取得
    pub fn substring(&self, start: usize, end: usize) -> Result<String, BufferError> {
        self.check_range(start, end)?;
        Ok(self.chars().skip(start).take(end - start).collect())
    }

    /// 指定位置に文字を挿入
    pub fn insert(&mut self, pos: usize, ch: char) -> Result<(), BufferError> {
        self.insert_chars(pos, &[ch])
    }

    /// 指定位置に文字列を挿入
    pub fn insert_str(&mut self, pos: usize, s: &str) -> Result<(), BufferError> {
        let chars: Vec<char> = s.chars().collect();
        self.insert_chars(pos, &chars)
    }

    fn insert_chars(&mut self, pos: usize, chars: &[char]) -> Result<(), BufferError> {
        if pos > self.len_chars() {
            return Err(BufferError::InvalidPosition { position: pos });
        }
        if chars.is_empty() {
            return Ok(());
        }

        self.move_gap_to(pos);
        if self.gap_size() < chars.len() {
            self.grow_gap(chars.len());
        }

        self.buffer[self.gap_start..self.gap_start + chars.len()].copy_from_slice(chars);
        self.gap_start += chars.len();
        Ok(())
    }

    /// 指定位置の文字を削除
    pub fn delete(&mut self, pos: usize) -> Result<char, BufferError> {
        let ch = self
            .char_at(pos)
            .ok_or(BufferError::InvalidPosition { position: pos })?;
        self.move_gap_to(pos);
        self.gap_end += 1;
        Ok(ch)
    }

    /// 指定範囲を削除し、削除したテキストを返す
    pub fn delete_range(&mut self, start: usize, end: usize) -> Result<String, BufferError> {
        self.check_range(start, end)?;
        let deleted = self.substring(start, end)?;
        self.move_gap_to(start);
        self.gap_end += end - start;
        Ok(deleted)
    }

    /// 全内容を置き換え
    pub fn replace_all(&mut self, s: &str) {
        *self = Self::from_str(s);
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), BufferError> {
        if start > end {
            return Err(BufferError::InvalidPosition { position: start });
        }
        if end > self.len_chars() {
            return Err(BufferError::InvalidPosition { position: end });
        }
        Ok(())
    }

    /// ギャップを指定位置へ移動
    fn move_gap_to(&mut self, pos: usize) {
        if pos < self.gap_start {
            let count = self.gap_start - pos;
            let new_end = self.gap_end - count;
            self.buffer.copy_within(pos..self.gap_start, new_end);
            self.gap_start = pos;
            self.gap_end = new_end;
        } else if pos > self.gap_start {
            let count = pos - self.gap_start;
            self.buffer
                .copy_within(self.gap_end..self.gap_end + count, self.gap_start);
            self.gap_start += count;
            self.gap_end += count;
        }
    }

    /// ギャップを拡張（必要量の2倍を確保）
    fn grow_gap(&mut self, required: usize) {
        let extra = (required * 2).max(MIN_GAP_RESERVE);
        let tail: Vec<char> = self.buffer[self.gap_end..].to_vec();
        let new_gap_end = self.gap_end + extra;

        self.buffer.resize(self.buffer.len() + extra, '\0');
        self.buffer[new_gap_end..].copy_from_slice(&tail);
        self.gap_end = new_gap_end;
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_read_back() {
        let mut buffer = GapBuffer::new();
        buffer.insert_str(0, "print()").unwrap();
        buffer.insert_str(6, "'hi'").unwrap();
        assert_eq!(buffer.to_string(), "print('hi')");
        assert_eq!(buffer.len_chars(), 11);
    }

    #[test]
    fn test_delete_moves_gap_backwards() {
        let mut buffer = GapBuffer::from_str("abcdef");
        assert_eq!(buffer.delete(0).unwrap(), 'a');
        assert_eq!(buffer.delete(4).unwrap(), 'f');
        assert_eq!(buffer.to_string(), "bcde");
    }

    #[test]
    fn test_delete_range_returns_text() {
        let mut buffer = GapBuffer::from_str("こんにちは世界");
        assert_eq!(buffer.delete_range(2, 5).unwrap(), "にちは");
        assert_eq!(buffer.to_string(), "こん世界");
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut buffer = GapBuffer::from_str("abc");
        assert!(buffer.insert(4, 'x').is_err());
        assert!(buffer.delete(3).is_err());
        assert!(buffer.delete_range(2, 1).is_err());
    }

    #[test]
    fn test_growth_preserves_tail() {
        let mut buffer = GapBuffer::with_capacity(2);
        buffer.insert_str(0, "tail").unwrap();
        buffer.insert_str(0, &"x".repeat(600)).unwrap();
        assert!(buffer.to_string().ends_with("tail"));
        assert_eq!(buffer.len_chars(), 604);
    }
}
