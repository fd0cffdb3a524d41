#![allow(dead_code)]

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Geo table: four entities over two years, one row without coordinates.
pub const GEO_CSV: &str = "\u{feff}Контрагент,Год,Широта,Долгота\r\n\
Агро,2022,55.75,37.61\r\n\
Агро,2023,55.75,37.61\r\n\
Нива,2023,51.53,46.03\r\n\
Колос,2023,45.04,38.98\r\n\
Рассвет,2023,,39.7\r\n";

/// Yield table with one zero yield and one key absent from the geo table.
pub const KPI_CSV: &str = "Контрагент,Год,Урожайность_ц_га\n\
Агро,2022,38.2\n\
Агро,2023,41.5\n\
Нива,2023,29.0\n\
Колос,2023,0\n\
Заря,2023,33.3\n";

pub const KPI_STATS_CSV: &str = "Контрагент,Mean,SD,CV_%,WAASB_proxy_%\n\
Агро,39.9,1.7,4.1,100\n\
Нива,29.0,0,0,100\n";

/// Write the three fixture tables into `dir` under their default names.
pub fn write_dataset_dir(dir: &Path) {
    std::fs::write(dir.join("geo.csv"), GEO_CSV).expect("write geo.csv");
    std::fs::write(dir.join("kpi.csv"), KPI_CSV).expect("write kpi.csv");
    std::fs::write(dir.join("kpi_stats.csv"), KPI_STATS_CSV).expect("write kpi_stats.csv");
}

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the previous values on unwind and serializes access to the
/// process-global environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
