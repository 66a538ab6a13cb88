#![no_main]

use libfuzzer_sys::fuzz_target;
use tzsleuth::estimator::TimezoneEstimator;
use tzsleuth::histogram::ActivityHistogram;
use tzsleuth::ingest::EventLog;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic; whatever parses must also estimate cleanly
        if let Ok(events) = EventLog::from_json_str(input) {
            let histogram = ActivityHistogram::from_events(&events);
            let _ = TimezoneEstimator::default().estimate(&histogram);
        }
    }
});
