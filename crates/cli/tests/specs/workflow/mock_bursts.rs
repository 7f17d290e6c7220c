//! Mock burst specs

use crate::prelude::*;

#[test]
fn missing_mock_data_fails_before_uploading() {
    let temp = Project::empty();
    temp.gwf()
        .args(&["mock-bursts"])
        .fails()
        .stderr_has("olib_data.json");
}
