//! Streaming handoff of a crop pack to the caller.
//!
//! A producer thread writes the archive into a bounded channel in fixed-size
//! chunks while the caller drains it through [`CropPackStream`]. Backpressure
//! comes from the channel depth: the producer blocks once `CHANNEL_DEPTH`
//! chunks are waiting.

use std::io::{self, Read, Write};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use super::archive::CropPackager;
use super::catalog::CropCatalog;
use super::prefix::{sanitize_prefix, CROP_PACK_CONTENT_TYPE};
use crate::decode::decode_image;
use crate::encode::EncodeError;
use crate::PipelineError;

const CHUNK_SIZE: usize = 64 * 1024;
const CHANNEL_DEPTH: usize = 4;

type Chunk = Result<Vec<u8>, PipelineError>;

/// Decode `input` and start streaming the standard crop pack.
///
/// Decoding happens on the calling thread, so an undecodable input fails here
/// before any archive byte exists. Rendering and compression run on a
/// producer thread; dropping the returned stream stops it.
pub fn build_crop_pack(input: Vec<u8>, prefix: Option<&str>) -> Result<CropPackStream, PipelineError> {
    let catalog = CropCatalog::standard()?;
    let image = decode_image(&input)?;
    drop(input);

    let prefix = sanitize_prefix(prefix);
    let file_name = format!("{}-crop-pack.zip", prefix);
    let (tx, rx) = mpsc::sync_channel::<Chunk>(CHANNEL_DEPTH);

    let producer = thread::Builder::new()
        .name("crop-pack".to_string())
        .spawn(move || {
            let packager = CropPackager::new(catalog, Some(prefix.as_str()));
            let mut writer = ChannelWriter::new(tx);

            let written = packager
                .write_archive(&image, &mut writer)
                .and_then(|w| w.flush().map_err(|e| EncodeError::Archive(e.to_string())));

            if let Err(e) = written {
                writer.fail(e.into());
            }
        })
        .map_err(|e| EncodeError::Archive(format!("failed to start crop pack producer: {e}")))?;

    Ok(CropPackStream {
        receiver: Some(rx),
        producer: Some(producer),
        pending: Vec::new(),
        position: 0,
        file_name,
    })
}

/// Decode `input` and write the standard crop pack into `sink` on the calling
/// thread.
///
/// Same archive bytes as [`build_crop_pack`], for callers without threads.
pub fn write_crop_pack<W: Write>(input: &[u8], prefix: Option<&str>, sink: W) -> Result<W, PipelineError> {
    let catalog = CropCatalog::standard()?;
    let image = decode_image(input)?;
    let packager = CropPackager::new(catalog, prefix);

    Ok(packager.write_archive(&image, sink)?)
}

/// A crop-pack archive being produced in the background.
///
/// Yields archive bytes in order, either as chunks through [`Iterator`] or as
/// a byte stream through [`Read`]. A failed archive yields one error and then
/// ends without a central directory. Dropping the stream cancels production
/// and waits for the producer thread to exit.
#[derive(Debug)]
pub struct CropPackStream {
    receiver: Option<Receiver<Chunk>>,
    producer: Option<JoinHandle<()>>,
    pending: Vec<u8>,
    position: usize,
    file_name: String,
}

impl CropPackStream {
    /// Suggested download name: `{prefix}-crop-pack.zip`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &'static str {
        CROP_PACK_CONTENT_TYPE
    }

    /// Drain the whole archive into memory.
    pub fn collect_bytes(self) -> Result<Vec<u8>, PipelineError> {
        let mut out = Vec::new();
        for chunk in self {
            out.extend_from_slice(&chunk?);
        }
        Ok(out)
    }

    fn next_chunk(&mut self) -> Option<Chunk> {
        let receiver = self.receiver.as_ref()?;
        match receiver.recv() {
            Ok(chunk) => Some(chunk),
            Err(_) => {
                // Channel closed: either the archive finished or the producer died.
                self.receiver = None;
                let producer = self.producer.take()?;
                match producer.join() {
                    Ok(()) => None,
                    Err(_) => Some(Err(
                        EncodeError::Archive("crop pack producer panicked".to_string()).into(),
                    )),
                }
            }
        }
    }
}

impl Iterator for CropPackStream {
    type Item = Chunk;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position < self.pending.len() {
            let rest = self.pending.split_off(self.position);
            self.pending.clear();
            self.position = 0;
            return Some(Ok(rest));
        }
        self.next_chunk()
    }
}

impl Read for CropPackStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while self.position >= self.pending.len() {
            match self.next_chunk() {
                Some(Ok(chunk)) => {
                    self.pending = chunk;
                    self.position = 0;
                }
                Some(Err(e)) => return Err(io::Error::other(e)),
                None => return Ok(0),
            }
        }

        let n = buf.len().min(self.pending.len() - self.position);
        buf[..n].copy_from_slice(&self.pending[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }
}

impl Drop for CropPackStream {
    fn drop(&mut self) {
        // Closing the receiver makes the producer's next send fail.
        self.receiver = None;
        if let Some(producer) = self.producer.take() {
            if producer.join().is_err() {
                tracing::warn!("crop pack producer panicked");
            }
        }
    }
}

/// `Write` sink that ships fixed-size chunks over a bounded channel.
struct ChannelWriter {
    sender: SyncSender<Chunk>,
    buffer: Vec<u8>,
}

impl ChannelWriter {
    fn new(sender: SyncSender<Chunk>) -> Self {
        Self {
            sender,
            buffer: Vec::with_capacity(CHUNK_SIZE),
        }
    }

    fn send_buffer(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let chunk = std::mem::replace(&mut self.buffer, Vec::with_capacity(CHUNK_SIZE));
        self.sender.send(Ok(chunk)).map_err(|_| {
            tracing::debug!("crop pack consumer went away");
            io::Error::new(io::ErrorKind::BrokenPipe, "crop pack stream closed")
        })
    }

    /// Report a failure to the consumer. Buffered bytes are dropped.
    fn fail(self, error: PipelineError) {
        let _ = self.sender.send(Err(error));
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let room = CHUNK_SIZE - self.buffer.len();
        let n = buf.len().min(room);
        self.buffer.extend_from_slice(&buf[..n]);
        if self.buffer.len() >= CHUNK_SIZE {
            self.send_buffer()?;
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.send_buffer()
    }
}
