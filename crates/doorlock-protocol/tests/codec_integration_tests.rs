//! Integration tests for LockLinkCodec with Tokio streams.
//!
//! The host end is framed with the codec; the lock end writes raw bytes the
//! way the firmware does, one reply at a time.

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio_util::codec::Framed;

use doorlock_core::{Credential, LockStatus};
use doorlock_protocol::{
    Ack, DecoderState, LockLinkCodec, LockReply, SerialFrameDecoder, StatusFrame,
};

/// Helper function to create a framed host end and a raw lock end.
fn create_link(buffer_size: usize) -> (Framed<DuplexStream, LockLinkCodec>, DuplexStream) {
    let (host, lock) = tokio::io::duplex(buffer_size);
    (Framed::new(host, LockLinkCodec::new()), lock)
}

#[tokio::test]
async fn test_credential_reaches_lock_decoder() {
    let (mut host, mut lock) = create_link(64);

    host.send("1234".parse::<Credential>().unwrap())
        .await
        .unwrap();

    let mut received = [0u8; 6];
    lock.read_exact(&mut received).await.unwrap();

    let mut decoder = SerialFrameDecoder::new();
    let decoded: Vec<_> = received
        .iter()
        .filter_map(|&b| decoder.feed_byte(b).ok().flatten())
        .collect();

    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].credential.to_string(), "1234");
    assert_eq!(decoder.state(), DecoderState::Idle);
}

#[tokio::test]
async fn test_replies_split_across_writes() {
    let (mut host, mut lock) = create_link(64);

    lock.write_all(b"S").await.unwrap();
    lock.write_all(b"S_U").await.unwrap();
    lock.write_all(b"_0#").await.unwrap();

    assert_eq!(
        host.next().await.unwrap().unwrap(),
        LockReply::Ack(Ack::Success)
    );
    assert_eq!(
        host.next().await.unwrap().unwrap(),
        LockReply::Status(StatusFrame::normal(LockStatus::Unlocked, 0).unwrap())
    );
}

#[tokio::test]
async fn test_periodic_status_stream() {
    let (host, mut lock) = create_link(256);

    lock.write_all(b"S_L_0#S_L_1#FS_D_3#S_D_3#S_L_0#")
        .await
        .unwrap();
    drop(lock);

    let replies: Vec<LockReply> = host.map(|r| r.unwrap()).collect().await;

    assert_eq!(replies.len(), 6);
    assert_eq!(replies[2], LockReply::Ack(Ack::Failure));
    assert_eq!(replies[3], LockReply::Status(StatusFrame::locked_out()));
    assert_eq!(
        replies[5],
        LockReply::Status(StatusFrame::normal(LockStatus::Locked, 0).unwrap())
    );
}

#[tokio::test]
async fn test_lock_side_encoder_roundtrip() {
    let (host, lock) = tokio::io::duplex(64);
    let mut host = Framed::new(host, LockLinkCodec::new());
    let mut lock = Framed::new(lock, LockLinkCodec::new());

    lock.send(LockReply::Ack(Ack::Failure)).await.unwrap();
    lock.send(LockReply::Status(
        StatusFrame::normal(LockStatus::Locked, 1).unwrap(),
    ))
    .await
    .unwrap();

    assert_eq!(
        host.next().await.unwrap().unwrap(),
        LockReply::Ack(Ack::Failure)
    );
    assert_eq!(
        host.next().await.unwrap().unwrap(),
        LockReply::Status(StatusFrame::normal(LockStatus::Locked, 1).unwrap())
    );
}
