use rand::Rng;
use runnel::{select, Channel, SelectOp};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
#[cfg_attr(miri, ignore)]
fn test_bounded_mpmc() {
    let ch = Channel::<usize>::new(4);
    let producers = 4;
    let items_per = 500;
    let total = producers * items_per;

    let mut handles = vec![];
    for p in 0..producers {
        let ch = ch.clone();
        handles.push(thread::spawn(move || {
            for i in 0..items_per {
                ch.send(p * items_per + i).unwrap();
            }
        }));
    }

    let sum = Arc::new(AtomicUsize::new(0));
    for _ in 0..2 {
        let ch = ch.clone();
        let sum = sum.clone();
        handles.push(thread::spawn(move || {
            let mut local = 0;
            for _ in 0..total / 2 {
                local += ch.recv().unwrap();
            }
            sum.fetch_add(local, Ordering::Relaxed);
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    let expected: usize = (0..total).sum();
    assert_eq!(sum.load(Ordering::SeqCst), expected);
    assert!(ch.is_empty());
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_select_two_channels_under_fire() {
    let a = Channel::<usize>::new(1);
    let b = Channel::<usize>::new(1);
    let total = 200;

    let feeder = {
        let a = a.clone();
        let b = b.clone();
        thread::spawn(move || {
            let mut rng = rand::rng();
            for i in 0..total {
                if rng.random_range(0..2) == 0 {
                    a.send(i).unwrap();
                } else {
                    b.send(i).unwrap();
                }
            }
        })
    };

    let mut seen = vec![];
    for _ in 0..total {
        let done = select(vec![SelectOp::Recv(&a), SelectOp::Recv(&b)]).unwrap();
        seen.push(done.value.unwrap());
    }
    feeder.join().unwrap();

    seen.sort();
    assert_eq!(seen, (0..total).collect::<Vec<_>>());
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_close_under_load() {
    let ch = Channel::<usize>::new(2);

    let mut handles = vec![];
    for p in 0..8 {
        let ch = ch.clone();
        handles.push(thread::spawn(move || {
            let mut delivered = 0;
            for i in 0..100 {
                if ch.send(p * 100 + i).is_err() {
                    break;
                }
                delivered += 1;
            }
            delivered
        }));
    }

    let mut received = 0;
    for _ in 0..50 {
        if ch.recv().is_ok() {
            received += 1;
        }
    }
    ch.close().unwrap();

    let mut delivered_total = 0;
    for h in handles {
        delivered_total += h.join().unwrap();
    }

    // Every accepted message was either consumed or is still buffered
    assert_eq!(delivered_total, received + ch.len());

    ch.destroy().unwrap();
    assert!(ch.is_empty());
}
