use serde_json::json;
use vulnsweep::error::AppError;
use vulnsweep::format::{render_details, render_summary};
use vulnsweep::model::{ImageRef, Severity, SeverityTally};
use vulnsweep::report::ScanReport;

const GRYPE_SAMPLE: &str = r#"{
  "matches": [
    {
      "vulnerability": {
        "id": "CVE-2023-5363",
        "dataSource": "https://security.alpinelinux.org/vuln/CVE-2023-5363",
        "namespace": "alpine:distro:alpine:3.18",
        "severity": "High",
        "urls": ["https://security.alpinelinux.org/vuln/CVE-2023-5363"],
        "cvss": [],
        "fix": { "versions": ["3.1.4-r0"], "state": "fixed" },
        "advisories": []
      },
      "relatedVulnerabilities": [
        {
          "id": "CVE-2023-5363",
          "dataSource": "https://nvd.nist.gov/vuln/detail/CVE-2023-5363",
          "namespace": "nvd:cpe",
          "severity": "High",
          "urls": ["https://www.openssl.org/news/secadv/20231024.txt"],
          "description": "Issue summary: A bug has been identified in the processing of key and initialisation vector lengths.",
          "cvss": [
            {
              "source": "nvd@nist.gov",
              "type": "Primary",
              "version": "3.1",
              "vector": "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:N/A:N",
              "metrics": { "baseScore": 7.5, "exploitabilityScore": 3.9, "impactScore": 3.6 },
              "vendorMetadata": {}
            }
          ]
        }
      ],
      "matchDetails": [
        {
          "type": "exact-direct-match",
          "matcher": "apk-matcher",
          "searchedBy": {
            "distro": { "type": "alpine", "version": "3.18.4" },
            "namespace": "alpine:distro:alpine:3.18",
            "package": { "name": "openssl", "version": "3.1.3-r0" }
          },
          "found": { "versionConstraint": "< 3.1.4-r0 (apk)", "vulnerabilityID": "CVE-2023-5363" }
        }
      ],
      "artifact": {
        "id": "b4b2c5b1a0b7d0b8",
        "name": "libcrypto3",
        "version": "3.1.3-r0",
        "type": "apk",
        "locations": [
          { "path": "/lib/apk/db/installed", "layerID": "sha256:cc2447e1835a40530975ab80bb1f872fbab0f2a0faecf2ab16fbbb89b3589438" }
        ],
        "language": "",
        "licenses": ["Apache-2.0"],
        "cpes": ["cpe:2.3:a:libcrypto3:libcrypto3:3.1.3-r0:*:*:*:*:*:*:*"],
        "purl": "pkg:apk/alpine/libcrypto3@3.1.3-r0?arch=aarch64&distro=alpine-3.18.4",
        "upstreams": [{ "name": "openssl" }]
      }
    }
  ],
  "source": {
    "type": "image",
    "target": {
      "userInput": "alpine:3.18",
      "imageID": "sha256:8ca4688f4f356596b5ae539337c9941abc78eda10021d35cbc52659c74d9b443",
      "manifestDigest": "sha256:cc2447e1835a40530975ab80bb1f872fbab0f2a0faecf2ab16fbbb89b3589438",
      "mediaType": "application/vnd.docker.distribution.manifest.v2+json",
      "tags": ["alpine:3.18"],
      "imageSize": 7627264,
      "layers": [
        {
          "mediaType": "application/vnd.docker.image.rootfs.diff.tar.gzip",
          "digest": "sha256:cc2447e1835a40530975ab80bb1f872fbab0f2a0faecf2ab16fbbb89b3589438",
          "size": 7627264
        }
      ],
      "manifest": "eyJzY2hlbWFWZXJzaW9uIjoyfQ==",
      "config": "eyJhcmNoaXRlY3R1cmUiOiJhcm02NCJ9",
      "repoDigests": []
    }
  },
  "distro": { "name": "alpine", "version": "3.18.4", "idLike": [] },
  "descriptor": { "name": "grype", "version": "0.73.0" }
}"#;

fn report_with(severities: &[&str]) -> String {
    let matches: Vec<_> = severities
        .iter()
        .enumerate()
        .map(|(index, severity)| {
            json!({
                "vulnerability": { "id": format!("CVE-2024-{index:04}"), "severity": severity },
                "artifact": { "name": "pkg", "version": "1.0" }
            })
        })
        .collect();
    json!({ "matches": matches, "source": { "type": "image", "target": { "userInput": "x" } } })
        .to_string()
}

#[test]
fn decodes_a_full_grype_document() {
    let report = ScanReport::from_json(GRYPE_SAMPLE).unwrap();

    assert_eq!(report.matches.len(), 1);
    let entry = &report.matches[0];
    assert_eq!(entry.vulnerability.id, "CVE-2023-5363");
    assert_eq!(entry.vulnerability.severity, "High");
    assert_eq!(entry.vulnerability.fix.state, "fixed");
    assert_eq!(entry.related_vulnerabilities[0].cvss[0].metrics.base_score, Some(7.5));
    assert_eq!(entry.match_details[0].found.vulnerability_id, "CVE-2023-5363");
    assert_eq!(entry.match_details[0].searched_by.package.name, "openssl");
    assert_eq!(entry.artifact.kind, "apk");
    assert!(entry.artifact.locations[0].layer_id.starts_with("sha256:"));

    assert_eq!(report.source.kind, "image");
    assert_eq!(report.source.target.user_input, "alpine:3.18");
    assert_eq!(report.source.target.image_size, Some(7_627_264));
    assert_eq!(report.source.target.layers.len(), 1);
}

#[test]
fn tally_and_summary_follow_the_canonical_order() {
    let report =
        ScanReport::from_json(&report_with(&["Critical", "Low", "High", "Low", "Critical", "Low"]))
            .unwrap();
    let tally = SeverityTally::from_report(&report);

    assert_eq!(tally.count("Critical"), 2);
    assert_eq!(tally.count("High"), 1);
    assert_eq!(tally.count("Medium"), 0);
    assert_eq!(tally.count("Low"), 3);

    let rendered = render_summary(&ImageRef::new("alpine:3.18"), &tally);
    assert_eq!(
        rendered,
        "Image Name: alpine:3.18\n\
         Critical Vulnerabilities: 2\n\
         High Vulnerabilities: 1\n\
         Medium Vulnerabilities: 0\n\
         Low Vulnerabilities: 3\n"
    );
}

#[test]
fn empty_match_list_gives_zero_counts() {
    let report = ScanReport::from_json(r#"{"matches": [], "source": {}}"#).unwrap();
    let tally = SeverityTally::from_report(&report);

    assert!(tally.is_empty());
    for severity in Severity::ALL {
        assert_eq!(tally.count_for(severity), 0);
    }
}

#[test]
fn null_matches_and_missing_source_are_accepted() {
    let report = ScanReport::from_json(r#"{"matches": null}"#).unwrap();
    assert!(report.matches.is_empty());
    assert_eq!(report.source.kind, "");
}

#[test]
fn decoding_twice_gives_identical_tallies() {
    let json = report_with(&["High", "Medium", "High"]);
    let first = SeverityTally::from_report(&ScanReport::from_json(&json).unwrap());
    let second = SeverityTally::from_report(&ScanReport::from_json(&json).unwrap());
    assert_eq!(first, second);
}

#[test]
fn labels_are_counted_verbatim() {
    let json = json!({
        "matches": [
            { "vulnerability": { "severity": "critical" } },
            { "vulnerability": { "severity": "Negligible" } },
            { "vulnerability": { "severity": null } },
            { "vulnerability": {} },
            { "vulnerability": { "severity": "Critical" } }
        ]
    })
    .to_string();
    let tally = SeverityTally::from_report(&ScanReport::from_json(&json).unwrap());

    assert_eq!(tally.count("Critical"), 1);
    assert_eq!(tally.count("critical"), 1);
    assert_eq!(tally.count(""), 2);
    assert_eq!(tally.total(), 5);
    assert_eq!(tally.uncategorized(), vec![("", 2), ("Negligible", 1), ("critical", 1)]);

    let rendered = render_summary(&ImageRef::new("busybox"), &tally);
    assert!(rendered.contains("Critical Vulnerabilities: 1"));
    assert!(!rendered.contains("Negligible"));
}

#[test]
fn type_mismatch_is_a_parse_error() {
    let err = ScanReport::from_json(r#"{"matches": "none"}"#).unwrap_err();
    assert!(matches!(err, AppError::ReportParse(_)));

    let err = ScanReport::from_json("grype: command not found").unwrap_err();
    assert!(matches!(err, AppError::ReportParse(_)));
}

#[test]
fn details_list_source_and_other_severities() {
    let report = ScanReport::from_json(GRYPE_SAMPLE).unwrap();
    let mut tally = SeverityTally::from_report(&report);
    tally.record("Unknown");

    let details = render_details(&report, &tally);
    assert!(details.contains("Source: alpine:3.18 (image), 7.63"));
    assert!(details.contains("MB, 1 layer(s)"));
    assert!(details.contains("Total matches: 2"));
    assert!(details.contains("Other severities: Unknown=1"));
}
