#![no_main]

use libfuzzer_sys::fuzz_target;
use static_fifo::RingBuffer;
use std::collections::VecDeque;

const CAP: usize = 7;

// Each input byte pair is (opcode, argument). The buffer is checked against a
// VecDeque after every step.
fuzz_target!(|data: &[u8]| {
    let mut fifo = RingBuffer::<u8, CAP>::new();
    let mut model: VecDeque<u8> = VecDeque::new();

    for pair in data.chunks_exact(2) {
        let (op, arg) = (pair[0], pair[1]);
        let n = (arg % 10) as usize;

        match op % 6 {
            0 | 1 => {
                let overwrite = op % 2 == 1;
                let batch: Vec<u8> = (0..n as u8).map(|i| arg.wrapping_add(i)).collect();
                let fits = batch.len() <= CAP - model.len();
                let written = fifo.push_slice(&batch, overwrite);
                if overwrite || fits {
                    assert_eq!(written, batch.len());
                    for value in batch {
                        if model.len() == CAP {
                            model.pop_front();
                        }
                        model.push_back(value);
                    }
                } else {
                    assert_eq!(written, 0);
                }
            }
            2 => assert_eq!(fifo.pop(), model.pop_front()),
            3 => {
                let mut out = vec![0u8; n];
                let k = fifo.pull(&mut out);
                let expected: Vec<u8> = model.drain(..n.min(model.len())).collect();
                assert_eq!(&out[..k], &expected[..]);
            }
            4 => {
                let expected = n.min(model.len());
                model.drain(..expected);
                assert_eq!(fifo.drop_oldest(n), expected);
            }
            _ => {
                let mut out = vec![0u8; n];
                let k = fifo.read(&mut out);
                assert!(model.iter().take(n).eq(out[..k].iter()));
            }
        }

        assert_eq!(fifo.len(), model.len());
        assert!(fifo.iter().eq(model.iter()));
    }
});
