use std::{fs, path::Path};

use anyhow::Result;
use cache::Cache;
use heed::{Database, Env, EnvOpenOptions, types::Str};

const DEFAULT_MAP_SIZE: usize = 10 * 1024 * 1024;

/// LMDB-backed cache that survives restarts.
///
/// The map size is fixed at open time; once it fills, writes fail with
/// `MDB_MAP_FULL` and callers are expected to treat that as a cache miss.
pub struct LocalCache {
    env: Env,
    storage: Database<Str, Str>,
}

impl LocalCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_map_size(path, DEFAULT_MAP_SIZE)
    }

    pub fn with_map_size<P: AsRef<Path>>(path: P, map_size: usize) -> Result<Self> {
        fs::create_dir_all(path.as_ref())?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(4)
                .open(path.as_ref())?
        };

        let mut wtxn = env.write_txn()?;
        let storage = env.create_database(&mut wtxn, Some("assessments"))?;
        wtxn.commit()?;

        log::debug!("Opened local cache at {}", path.as_ref().display());

        Ok(LocalCache { env, storage })
    }
}

impl Cache for LocalCache {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let read_txn = self.env.read_txn()?;
        let value = self.storage.get(&read_txn, key)?.map(str::to_owned);
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut write_txn = self.env.write_txn()?;
        self.storage.put(&mut write_txn, key, value)?;
        write_txn.commit()?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool> {
        let mut write_txn = self.env.write_txn()?;
        let removed = self.storage.delete(&mut write_txn, key)?;
        write_txn.commit()?;
        Ok(removed)
    }
}
