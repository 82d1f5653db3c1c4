//! Error path and edge case tests
//!
//! These tests focus on the two failure classes:
//! - Contract violations, which panic
//! - Capacity conditions, which are reported through return values

use static_fifo::{FifoError, OverflowPolicy, RingBuffer, Stage, StageConfig};

// ============================================================================
// Contract Violation Tests
// ============================================================================

mod contract_tests {
    use super::*;

    #[test]
    #[should_panic(expected = "too many elements to initialize ring buffer")]
    fn test_over_long_initializer_panics() {
        let _ = RingBuffer::<u8, 3>::from_slice(&[1, 2, 3, 4]);
    }

    #[test]
    fn test_try_from_slice_reports_sizes() {
        let err = RingBuffer::<u8, 3>::try_from_slice(&[0; 8]).unwrap_err();
        match err {
            FifoError::CapacityExceeded {
                requested,
                capacity,
            } => {
                assert_eq!(requested, 8);
                assert_eq!(capacity, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

// ============================================================================
// Capacity Condition Tests
// ============================================================================

mod capacity_tests {
    use super::*;

    #[test]
    fn test_full_buffer_rejects_without_panicking() {
        let mut fifo = RingBuffer::<u8, 2>::from_slice(&[1, 2]);
        assert!(!fifo.push(3, false));
        assert_eq!(fifo.push_slice(&[3, 4], false), 0);
        assert_eq!(fifo.len(), 2);
    }

    #[test]
    fn test_empty_buffer_consumers_return_nothing() {
        let mut fifo = RingBuffer::<u8, 2>::new();
        assert_eq!(fifo.pop(), None);
        assert_eq!(fifo.peek(), None);
        assert_eq!(fifo.peek_newest(), None);
        assert_eq!(fifo.drop_oldest(5), 0);
        assert_eq!(fifo.pull(&mut [0; 4]), 0);
    }

    #[test]
    fn test_zero_length_destination() {
        let mut fifo = RingBuffer::<u8, 2>::from_slice(&[1]);
        assert_eq!(fifo.read(&mut []), 0);
        assert_eq!(fifo.pull(&mut []), 0);
        assert_eq!(fifo.len(), 1);
    }

    #[test]
    fn test_len_never_exceeds_capacity() {
        let mut fifo = RingBuffer::<u8, 3>::new();
        for i in 0..50u8 {
            fifo.push(i, i % 2 == 0);
            assert!(fifo.len() <= fifo.capacity());
        }
    }
}

// ============================================================================
// Stage Error Tests
// ============================================================================

mod stage_error_tests {
    use super::*;

    #[test]
    fn test_stage_rejects_invalid_watermark() {
        let config = StageConfig {
            overflow: OverflowPolicy::Reject,
            high_watermark: 3.0,
            trace_events: true,
        };
        let err = Stage::<u8, 4>::new("audio", config).err().unwrap();
        assert!(matches!(err, FifoError::InvalidConfig(_)));
    }
}
