// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use gwf_adapters::FakeTracker;

/// Lay out the artifacts of a finished two-detector job
fn finished_job(work_dir: &Path) {
    let run_dir = work_dir.join("trigtime_1187008882.430000000_0.0_0.0_0");
    std::fs::create_dir_all(run_dir.join("tables")).unwrap();
    std::fs::write(
        run_dir.join("tables/signal_mode_H1.txt"),
        "# H1\nfrequency 153.4567 120.001 190.999\nbandwidth 40.126 20.5 80.004\nduration 0.0 -1.0 1.0\n",
    )
    .unwrap();
    std::fs::write(
        run_dir.join("tables/signal_mode_L1.txt"),
        "frequency 150 110 200\nbandwidth 35 25 45\nduration -2 -3 -1\n",
    )
    .unwrap();
    std::fs::write(
        run_dir.join("evidence_stacked.dat"),
        "noise -100.5 0.04\nglitch -90.25 0.05\nsignal -80.0 0.12\n",
    )
    .unwrap();
    std::fs::write(run_dir.join("skymap_1187008882.fits"), "SIMPLE = T").unwrap();
}

fn harvester(tracker: &FakeTracker) -> Harvester<FakeTracker> {
    Harvester::new(
        Reporter::new(tracker.clone()),
        HarvestSettings {
            report_url: "https://reports.invalid/{event_id}/".to_string(),
            ..HarvestSettings::default()
        },
    )
}

#[tokio::test]
async fn uploads_products_to_preferred_event() {
    let dir = tempfile::tempdir().unwrap();
    finished_job(dir.path());
    let tracker = FakeTracker::new();

    let report = harvester(&tracker)
        .harvest(dir.path(), "G1", &[Instrument::H1, Instrument::L1])
        .await
        .unwrap();

    let uploads = tracker.uploads();
    assert_eq!(uploads.len(), 4);
    assert!(uploads.iter().all(|u| u.target_id == "G1"));

    // Sky map and link form an unordered pair ahead of the tables
    let mut first_two: Vec<&str> = uploads[..2].iter().map(|u| u.message.as_str()).collect();
    first_two.sort();
    assert_eq!(
        first_two,
        vec![
            "BayesWave <a href=\"https://reports.invalid/G1/\">full report</a>",
            "BayesWave sky localization",
        ]
    );
    let skymap = uploads
        .iter()
        .find(|u| u.filename.is_some())
        .unwrap();
    assert_eq!(skymap.filename.as_deref(), Some("bayeswave.fits.gz"));
    assert_eq!(skymap.tag_names(), vec!["sky_loc", "pe"]);
    assert_eq!(skymap.content.as_deref(), Some(&std::fs::read(&report.skymap).unwrap()[..]));

    assert!(uploads[2].message.contains(
        "<tr><td>H1</td><td>153.46 [120, 191]</td><td>40.13 [20.5, 80]</td><td>1 [0.1, 10]</td></tr>"
    ));
    assert!(uploads[2]
        .message
        .contains("<tr><td>L1</td><td>150 [110, 200]</td><td>35 [25, 45]</td><td>0.01 [0.001, 0.1]</td></tr>"));
    assert!(uploads[3].message.contains("<td>10.25 &plusmn; 0.41</td>"));
    assert!(uploads[3].message.contains("<td>20.5 &plusmn; 0.4</td>"));
}

#[tokio::test]
async fn missing_instrument_table_uploads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    finished_job(dir.path());
    let tracker = FakeTracker::new();

    let err = harvester(&tracker)
        .harvest(
            dir.path(),
            "G1",
            &[Instrument::H1, Instrument::L1, Instrument::V1],
        )
        .await
        .unwrap_err();

    assert!(matches!(err, WorkflowError::MissingArtifact { .. }));
    assert!(tracker.uploads().is_empty());
}

#[tokio::test]
async fn missing_skymap_uploads_nothing() {
    let dir = tempfile::tempdir().unwrap();
    finished_job(dir.path());
    for entry in std::fs::read_dir(dir.path()).unwrap() {
        let run_dir = entry.unwrap().path();
        std::fs::remove_file(run_dir.join("skymap_1187008882.fits")).unwrap();
    }
    let tracker = FakeTracker::new();

    let err = harvester(&tracker)
        .harvest(dir.path(), "G1", &[Instrument::H1])
        .await
        .unwrap_err();

    assert!(err.to_string().contains("sky map"));
    assert!(tracker.uploads().is_empty());
}

#[test]
fn collect_computes_factors() {
    let dir = tempfile::tempdir().unwrap();
    finished_job(dir.path());

    let report = collect(dir.path(), &[Instrument::L1], "bw.fits.gz").unwrap();
    assert_eq!(report.factors.ln_bsg, 10.25);
    assert_eq!(report.factors.ln_bsn, 20.5);
    assert_eq!(report.summaries.len(), 1);
    assert_eq!(report.skymap, dir.path().join("bw.fits.gz"));
}
