//! One open image: path, headers, working grid, and the as-loaded snapshot.

use std::fs::{File, OpenOptions};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use enough::{Stop, Unstoppable};

use crate::bmp::{self, FileHeader, InfoHeader};
use crate::error::BmpError;
use crate::filter::{self, FilterKind};
use crate::grid::PixelGrid;
use crate::limits::Limits;

fn open_rw(path: &Path) -> Result<File, BmpError> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(|source| BmpError::NotFound {
            path: path.to_path_buf(),
            source,
        })
}

/// Builder for loading a session with optional limits.
#[derive(Clone, Debug)]
pub struct LoadRequest<'a> {
    path: &'a Path,
    limits: Option<&'a Limits>,
}

impl<'a> LoadRequest<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Open the file for reading and writing and decode it.
    ///
    /// The file is opened read/write up front so an image that could never
    /// be saved back is rejected at load.
    pub fn load(self, stop: impl Stop) -> Result<ImageSession, BmpError> {
        let mut reader = BufReader::new(open_rw(self.path)?);
        let decoded = bmp::decode(&mut reader, self.limits, &stop)?;
        let original = decoded.grid.snapshot();
        Ok(ImageSession {
            path: self.path.to_path_buf(),
            file_header: decoded.file_header,
            info_header: decoded.info_header,
            grid: decoded.grid,
            original,
        })
    }
}

/// A loaded image being edited in place.
#[derive(Clone, Debug)]
pub struct ImageSession {
    path: PathBuf,
    file_header: FileHeader,
    info_header: InfoHeader,
    grid: PixelGrid,
    original: PixelGrid,
}

impl ImageSession {
    /// Load `path` with no limits.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BmpError> {
        LoadRequest::new(path.as_ref()).load(Unstoppable)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file_header
    }

    pub fn info_header(&self) -> &InfoHeader {
        &self.info_header
    }

    /// The working pixels.
    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut PixelGrid {
        &mut self.grid
    }

    /// The pixels exactly as loaded. Never modified.
    pub fn original(&self) -> &PixelGrid {
        &self.original
    }

    /// Apply one filter to the working grid.
    pub fn apply(&mut self, kind: FilterKind) {
        filter::apply(kind, &mut self.grid, &self.original);
    }

    /// Write the working pixels back into the loaded file.
    pub fn save(&self) -> Result<(), BmpError> {
        self.save_with(Unstoppable)
    }

    /// Like [`save`](Self::save), checking `stop` between rows.
    pub fn save_with(&self, stop: impl Stop) -> Result<(), BmpError> {
        let mut file = open_rw(&self.path)?;
        let written = bmp::write_pixels(&mut file, &self.file_header, &self.grid, &stop)?;
        log::debug!("wrote {written} pixel bytes to {}", self.path.display());
        Ok(())
    }

    /// Write the working pixels to a new, canonical 24-bit BMP at `path`.
    ///
    /// Resolution and the height sign are carried over from the loaded file.
    /// The session keeps pointing at its original path.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<(), BmpError> {
        let path = path.as_ref();
        let bytes = bmp::encode(&self.grid, Some(&self.info_header))?;
        std::fs::write(path, &bytes)?;
        log::debug!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
