/// # Summary
/// 固定容量的滚动环形窗口。
///
/// # Invariants
/// - 内存空间在初始化时一次性分配，后续不再扩容。
/// - 始终保持最近 N 个元素，容量必须大于 0。
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
    // 内部存储容器
    data: Vec<T>,
    // 最大容量
    capacity: usize,
    // 已满时下一次覆盖的位置
    cursor: usize,
}

impl<T> RollingWindow<T> {
    /// # Summary
    /// 创建一个新的滚动窗口。
    ///
    /// # Arguments
    /// * `capacity`: 固定容量上限，为 0 时按 1 处理。
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    /// # Summary
    /// 向窗口推送新元素。
    ///
    /// # Logic
    /// 1. 若未满，则直接 push。
    /// 2. 若已满，则覆盖 cursor 处最旧的元素，并递增（取模）cursor。
    ///
    /// # Returns
    /// 被挤出窗口的旧元素；窗口未满时为 None。
    pub fn push(&mut self, item: T) -> Option<T> {
        if self.data.len() < self.capacity {
            self.data.push(item);
            None
        } else {
            let evicted = std::mem::replace(&mut self.data[self.cursor], item);
            self.cursor = (self.cursor + 1) % self.capacity;
            Some(evicted)
        }
    }

    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_evicts_oldest_once_full() {
        let mut window = RollingWindow::new(3);
        assert_eq!(window.push(1), None);
        assert_eq!(window.push(2), None);
        assert!(!window.is_full());
        assert_eq!(window.push(3), None);
        assert!(window.is_full());
        assert_eq!(window.push(4), Some(1));
        assert_eq!(window.push(5), Some(2));
        assert_eq!(window.push(6), Some(3));
        assert!(window.is_full());
    }

    #[test]
    fn test_zero_capacity_behaves_as_one() {
        let mut window = RollingWindow::new(0);
        assert!(!window.is_full());
        assert_eq!(window.push('a'), None);
        assert!(window.is_full());
        assert_eq!(window.push('b'), Some('a'));
        assert_eq!(window.push('c'), Some('b'));
    }
}
