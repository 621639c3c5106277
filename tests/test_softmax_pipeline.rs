// Softmax over token vocabularies: CORDIC kernel vs platform expf
use mini_cordic::cordic_softmax::ffi;
use mini_cordic::{softmax, CordicSoftmax, ExpKernel, StdExp};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::thread;

/// One Q3.12 step
const LSB: f32 = 1.0 / 4096.0;

fn normal_logits(rng: &mut StdRng, n: usize, std_dev: f32) -> Vec<f32> {
    let normal = Normal::new(0.0f32, std_dev).unwrap();
    (0..n).map(|_| normal.sample(&mut *rng)).collect()
}

fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate() {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

#[test]
fn test_vocabulary_softmax_invariants() {
    let mut rng = StdRng::seed_from_u64(2024);
    let cordic = CordicSoftmax::new();

    for vocab in [100usize, 1000, 10_000] {
        let logits = normal_logits(&mut rng, vocab, 3.0);
        let probs = cordic.softmax(&logits);
        let reference = StdExp.softmax(&logits);

        assert_eq!(probs.len(), vocab);
        assert!(probs.iter().all(|&p| (0.0..=1.0).contains(&p)));

        let sum: f64 = probs.iter().map(|&p| p as f64).sum();
        assert!((sum - 1.0).abs() < 1e-4, "vocab {} sum {}", vocab, sum);

        // Tokens whose logits sit within one Q3.12 step of the max may tie
        let top = argmax(&probs);
        let reference_top = argmax(&reference);
        assert!(
            top == reference_top || (logits[top] - logits[reference_top]).abs() < LSB,
            "vocab {}: top-1 {} vs {}",
            vocab,
            top,
            reference_top
        );

        let mse: f64 = probs
            .iter()
            .zip(&reference)
            .map(|(a, b)| ((a - b) as f64).powi(2))
            .sum::<f64>()
            / vocab as f64;
        println!("vocab {:>6}: sum {:.8} MSE {:.3e}", vocab, sum, mse);
        // Logits more than 15 below the max take the saturated path
        assert!(mse < 1e-3);
    }
}

#[test]
fn test_top1_preserved_across_seeded_vocabularies() {
    let cordic = CordicSoftmax::new();
    let mut mismatches = 0;
    let mut cases = 0;

    for seed in 0..200u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        for vocab in [100usize, 1000, 10_000] {
            let logits = normal_logits(&mut rng, vocab, 3.0);
            let top = argmax(&cordic.softmax(&logits));
            let reference_top = argmax(&StdExp.softmax(&logits));
            cases += 1;
            if top != reference_top && (logits[top] - logits[reference_top]).abs() >= LSB {
                mismatches += 1;
            }
        }
    }

    println!("top-1 mismatches: {}/{}", mismatches, cases);
    assert_eq!(mismatches, 0);
}

#[test]
fn test_basic_three_logits() {
    let probs = softmax(&[1.0, 2.0, 3.0]);
    let expected = StdExp.softmax(&[1.0, 2.0, 3.0]);
    for (p, e) in probs.iter().zip(&expected) {
        assert!((p - e).abs() < 1e-3);
    }
    assert!(probs[0] < probs[1] && probs[1] < probs[2]);
}

#[test]
fn test_shift_invariance() {
    let logits = [0.25f32, -1.5, 2.0, 0.0];
    let shifted: Vec<f32> = logits.iter().map(|x| x + 100.0).collect();
    assert_eq!(softmax(&logits), softmax(&shifted));
}

#[test]
fn test_edge_shapes() {
    assert!(softmax(&[]).is_empty());
    assert_eq!(softmax(&[42.0]), vec![1.0]);

    let uniform = softmax(&[3.0; 8]);
    assert!(uniform.iter().all(|&p| (p - 0.125).abs() < 1e-6));
}

#[test]
fn test_shape_mismatch_reported() {
    let mut out = [0.0f32; 2];
    assert!(CordicSoftmax::new().softmax_into(&[1.0, 2.0, 3.0], &mut out).is_err());
}

#[test]
fn test_c_api_matches_rust() {
    let mut rng = StdRng::seed_from_u64(9);
    let logits = normal_logits(&mut rng, 512, 2.0);
    let mut out = vec![0.0f32; logits.len()];
    unsafe { ffi::cordic_softmax(logits.as_ptr(), out.as_mut_ptr(), logits.len()) };
    assert_eq!(out, softmax(&logits));
    assert_eq!(ffi::cordic_exp(0.5), mini_cordic::exp(0.5));
}

#[test]
fn test_concurrent_callers_agree() {
    let logits: Vec<f32> = (0..256).map(|i| (i as f32 * 0.173).sin() * 6.0).collect();
    let expected = softmax(&logits);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let logits = logits.clone();
            thread::spawn(move || softmax(&logits))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
