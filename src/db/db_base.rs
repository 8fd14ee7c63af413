//! Base implementation of an append-only file database for struct records

use serde_json;
use std::fs;
use std::fs::File;
use std::io::{Read, Write};
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub struct LedgerFileDb<T>
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de> + Clone,
{
    db: Arc<Mutex<BaseLedgerFileDb<T>>>,
}

impl<T> LedgerFileDb<T>
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de> + Clone,
{
    pub fn new(file_path: String) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(LedgerFileDb::<T> {
            db: Arc::new(Mutex::new(BaseLedgerFileDb::<T>::new(file_path)?)),
        })
    }

    /// Records are immutable once written: append is the only mutation.
    pub fn append(&self, item: T) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut db = self.db.lock().unwrap();
        db.data.push(item);
        db.save()
    }

    pub fn data(&self) -> Vec<T> {
        let db = self.db.lock().unwrap();
        db.data.clone()
    }

    pub fn is_data_empty(&self) -> bool {
        let db = self.db.lock().unwrap();
        db.data.is_empty()
    }
}

struct BaseLedgerFileDb<T: serde::Serialize + for<'de> serde::Deserialize<'de>> {
    file_path: String,
    data: Vec<T>,
}

impl<T: serde::Serialize + for<'de> serde::Deserialize<'de>> BaseLedgerFileDb<T> {
    fn new(file_path: String) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut content = String::new();

        if !fs::exists(&file_path)? {
            // split and get folder, create folder if necessary
            let folder_path = file_path.split("/").collect::<Vec<&str>>()
                [..(file_path.split("/").count() - 1)]
                .join("/");
            if !folder_path.is_empty() && !fs::exists(&folder_path)? {
                fs::create_dir_all(&folder_path)?;
                info!("Created folder: {}", folder_path);
            }

            File::create(&file_path)?;
            info!("Created file: {}", file_path);
        } else {
            let mut file = File::open(&file_path)?;
            file.read_to_string(&mut content)?;
        } // file closed

        let data: Vec<T> = if content.is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(&content)?
        };

        Ok(BaseLedgerFileDb::<T> { file_path, data })
    }

    fn save(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let content = serde_json::to_string_pretty(&self.data)?;

        let tmp_path = format!("{}.tmp", &self.file_path);
        let mut file = File::create(&tmp_path)?; // this truncates the exiting file if any
        file.write_all(content.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &self.file_path)?; // this replaces the existing file

        info!("Saved file: {}", self.file_path);

        Ok(())
    }
}
