use runnel::{Channel, RecvError, SendError, TryRecvError, TrySendError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[test]
#[cfg_attr(miri, ignore)]
fn test_close_wakes_all_blocked_senders() {
    let ch = Channel::new(1);
    ch.send(0).unwrap();

    let t1 = {
        let ch = ch.clone();
        thread::spawn(move || ch.send(1))
    };
    let t2 = {
        let ch = ch.clone();
        thread::spawn(move || ch.send(2))
    };
    thread::sleep(Duration::from_millis(50));

    ch.close().unwrap();

    // Each sender gets its own value handed back
    assert_eq!(t1.join().unwrap(), Err(SendError(1)));
    assert_eq!(t2.join().unwrap(), Err(SendError(2)));
}

#[test]
#[cfg_attr(miri, ignore)]
fn test_close_wakes_blocked_receivers() {
    let ch = Channel::<i32>::new(1);

    let t1 = {
        let ch = ch.clone();
        thread::spawn(move || ch.recv())
    };
    let t2 = {
        let ch = ch.clone();
        thread::spawn(move || ch.recv())
    };
    thread::sleep(Duration::from_millis(50));

    ch.close().unwrap();

    assert_eq!(t1.join().unwrap(), Err(RecvError));
    assert_eq!(t2.join().unwrap(), Err(RecvError));
}

#[test]
fn test_close_idempotent() {
    let ch = Channel::<i32>::new(1);
    assert!(ch.close().is_ok());
    assert!(ch.close().is_err());
    assert!(ch.close().is_err());
}

#[test]
fn test_operations_after_close() {
    let ch = Channel::new(2);
    ch.send(9).unwrap();
    ch.close().unwrap();

    assert_eq!(ch.send(10), Err(SendError(10)));
    assert_eq!(ch.recv(), Err(RecvError));
    assert_eq!(ch.try_send(11), Err(TrySendError::Closed(11)));
    assert_eq!(ch.try_recv(), Err(TryRecvError::Closed));
}

#[test]
fn test_destroy_requires_close() {
    let ch = Channel::new(2);
    ch.send(1).unwrap();

    assert_eq!(ch.destroy().unwrap_err().code(), runnel::code::DESTROY_ERROR);

    // The failed destroy left the channel fully usable
    ch.send(2).unwrap();
    assert_eq!(ch.recv(), Ok(1));

    ch.close().unwrap();
    assert!(ch.destroy().is_ok());
    assert!(ch.is_empty());

    // Destroying an already drained channel is harmless
    assert!(ch.destroy().is_ok());
}

#[test]
fn test_destroy_drops_buffered_messages() {
    let probe = Arc::new(());
    let ch = Channel::new(4);
    ch.send(probe.clone()).unwrap();
    ch.send(probe.clone()).unwrap();
    assert_eq!(Arc::strong_count(&probe), 3);

    ch.close().unwrap();
    ch.destroy().unwrap();
    assert_eq!(Arc::strong_count(&probe), 1);
}
