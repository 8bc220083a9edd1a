use super::PasswordTester;
use std::fs::File;
use std::io::{self, BufReader, Read, Seek};
use std::path::{Path, PathBuf};
use zip::ZipArchive;
use zip::result::ZipResult;

type Archive = ZipArchive<BufReader<File>>;

/// Tests candidates against one entry of a ZipCrypto-protected archive
///
/// ZipCrypto only checks one or two bytes of the decryption header when an
/// entry is opened, so roughly one wrong password in 256 opens "successfully".
/// A candidate is therefore accepted only after the whole entry has been
/// decrypted, inflated and its CRC-32 checked by draining the stream.
#[derive(Debug, Clone)]
pub struct ZipTester {
    path: PathBuf,
    entry_index: usize,
    reuse_handle: bool,
}

/// Per-worker archive handle cache
#[derive(Default)]
pub struct ZipSession {
    archive: Option<Archive>,
}

impl ZipTester {
    pub fn new(path: impl Into<PathBuf>, entry_index: usize) -> Self {
        Self {
            path: path.into(),
            entry_index,
            reuse_handle: true,
        }
    }

    /// Keep one read-only handle per worker instead of reopening per candidate
    pub fn reuse_handle(mut self, reuse: bool) -> Self {
        self.reuse_handle = reuse;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_index(&self) -> usize {
        self.entry_index
    }

    /// Parse the central directory once and report what the target looks like
    ///
    /// Used before a run to warn about archives every candidate would fail
    /// against. It never influences the verdict of [`PasswordTester::test`].
    pub fn inspect(&self) -> ZipResult<EntryInfo> {
        let mut archive = self.open()?;
        let entries = archive.len();
        let entry = archive.by_index_raw(self.entry_index).ok().map(|file| TargetEntry {
            name: file.name().to_string(),
            encrypted: file.encrypted(),
            size: file.size(),
        });
        Ok(EntryInfo { entries, entry })
    }

    fn open(&self) -> ZipResult<Archive> {
        let file = File::open(&self.path)?;
        ZipArchive::new(BufReader::new(file))
    }
}

/// Summary of the archive returned by [`ZipTester::inspect`]
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub entries: usize,
    /// `None` when the configured index is out of range
    pub entry: Option<TargetEntry>,
}

#[derive(Debug, Clone)]
pub struct TargetEntry {
    pub name: String,
    pub encrypted: bool,
    pub size: u64,
}

impl PasswordTester for ZipTester {
    type Session = ZipSession;

    fn session(&self) -> ZipSession {
        ZipSession::default()
    }

    fn test(&self, session: &mut ZipSession, candidate: &str) -> bool {
        if !self.reuse_handle {
            return match self.open() {
                Ok(mut archive) => verify(&mut archive, self.entry_index, candidate),
                Err(_) => false,
            };
        }

        if session.archive.is_none() {
            session.archive = self.open().ok();
        }
        match session.archive.as_mut() {
            Some(archive) => verify(archive, self.entry_index, candidate),
            None => false,
        }
    }
}

/// Open the entry with `candidate` and read it to the end
///
/// The decrypting reader and the inflater are rebuilt on every call, so
/// nothing carries over between candidates sharing a handle.
fn verify<R: Read + Seek>(archive: &mut ZipArchive<R>, index: usize, candidate: &str) -> bool {
    let mut entry = match archive.by_index_decrypt(index, candidate.as_bytes()) {
        Ok(entry) => entry,
        Err(_) => return false,
    };
    io::copy(&mut entry, &mut io::sink()).is_ok()
}
