//! # Grouper
//!
//! 任意のイテレータを固定サイズのグループに分割する

/// 固定サイズのグループを返すイテレータ
///
/// 最後のグループは入力が尽きた時点で短くなる（埋め草は入れず、捨てもしない）
#[derive(Debug, Clone)]
pub struct Grouper<I> {
    iter: I,
    size: usize,
}

/// `iterable` を最大 `size` 件ずつのグループに分割します。
///
/// `size` が 0 の場合は入力全体が1つのグループになります。
///
/// # 例
///
/// ```
/// use livesync::domain::services::grouper::grouper;
///
/// let groups: Vec<Vec<u32>> = grouper(1..=5, 2).collect();
/// assert_eq!(groups, vec![vec![1, 2], vec![3, 4], vec![5]]);
///
/// // 空の入力からはグループが出ない
/// assert_eq!(grouper(Vec::<u32>::new(), 3).count(), 0);
/// ```
pub fn grouper<I: IntoIterator>(iterable: I, size: usize) -> Grouper<I::IntoIter> {
    Grouper {
        iter: iterable.into_iter(),
        size,
    }
}

impl<I: Iterator> Iterator for Grouper<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let group: Vec<I::Item> = if self.size == 0 {
            self.iter.by_ref().collect()
        } else {
            self.iter.by_ref().take(self.size).collect()
        };

        if group.is_empty() {
            None
        } else {
            Some(group)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouper_exact_multiple() {
        let groups: Vec<Vec<i32>> = grouper(vec![1, 2, 3, 4], 2).collect();
        assert_eq!(groups, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_grouper_short_trailing_group() {
        let groups: Vec<Vec<i32>> = grouper(vec![1, 2, 3, 4, 5], 2).collect();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[2], vec![5]);
    }

    #[test]
    fn test_grouper_smaller_than_size() {
        let groups: Vec<Vec<i32>> = grouper(vec![1, 2], 100).collect();
        assert_eq!(groups, vec![vec![1, 2]]);
    }

    #[test]
    fn test_grouper_empty() {
        let groups: Vec<Vec<i32>> = grouper(Vec::new(), 3).collect();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_grouper_zero_size() {
        let groups: Vec<Vec<i32>> = grouper(vec![1, 2, 3], 0).collect();
        assert_eq!(groups, vec![vec![1, 2, 3]]);

        assert_eq!(grouper(Vec::<i32>::new(), 0).count(), 0);
    }

    #[test]
    fn test_grouper_is_lazy() {
        let mut pulled = 0;
        let source = (0..10).inspect(|_| pulled += 1);

        let first = grouper(source, 3).next().unwrap();

        assert_eq!(first, vec![0, 1, 2]);
        assert_eq!(pulled, 3);
    }
}
