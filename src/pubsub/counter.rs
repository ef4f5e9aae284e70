/// Счётчик сообщений сессии.
///
/// Живёт только в памяти процесса, начинается с нуля и растёт ровно на
/// единицу за каждую успешную отправку или получение.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MessageCounter {
    total: u64,
}

impl MessageCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Учитывает одно сообщение и возвращает его порядковый номер.
    pub fn record(&mut self) -> u64 {
        self.total += 1;
        self.total
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(MessageCounter::new().total(), 0);
    }

    #[test]
    fn test_record_increments_by_one() {
        let mut c = MessageCounter::new();
        let seqs: Vec<u64> = (0..5).map(|_| c.record()).collect();
        assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
        assert_eq!(c.total(), 5);
    }
}
