//! Integration tests for the pipeline module.

use std::fs;
use std::path::Path;

use cca_cli::config::{PipelineConfig, SourceConfig};
use cca_cli::pipeline::{run_all, run_microdata, run_statistical_series, tidy_series};
use cca_cli::types::ProductStatus;
use cca_ingest::DirectorySource;
use cca_model::{RoundingMode, SeriesDefinition};
use tempfile::TempDir;

const WASMUN_TSV: &str = "freq,wst_oper,unit,geo\\TIME_PERIOD\t2020 \t2021 \t2022 \n\
A,GEN,KG_HAB,ES\t464 \t472 \t: \n\
A,GEN,KG_HAB,EU27_2020\t505 \t513 e\t511 p\n\
A,GEN,KG_HAB,FR\t540 \t545 \t539 \n\
A,GEN,THS_T,ES\t21900 \t22400 \t: \n\
A,TRT,KG_HAB,ES\t460 \t470 \t: \n";

const WASPAC_TSV: &str = "freq,waste,wst_oper,unit,geo\\TIME_PERIOD\t2021 \t2022 \n\
A,W1501,RCV,PC,ES\t70.3 \t71.4 \n\
A,W1501,RCV,PC,EU27_2020\t: \t65.4 e\n\
A,W1501,RCV,PC,FR\t60 \t61 \n\
A,W150101,RCV,PC,ES\t80 \t81 \n";

struct Fixture {
    source_dir: TempDir,
    data_dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let source_dir = TempDir::new().unwrap();
        fs::write(source_dir.path().join("env_wasmun.tsv"), WASMUN_TSV).unwrap();
        fs::write(source_dir.path().join("env_waspac.tsv"), WASPAC_TSV).unwrap();
        Self {
            source_dir,
            data_dir: TempDir::new().unwrap(),
        }
    }

    fn config(&self) -> PipelineConfig {
        PipelineConfig {
            data_dir: self.data_dir.path().to_path_buf(),
            source: SourceConfig::Directory {
                path: self.source_dir.path().to_path_buf(),
            },
            ..PipelineConfig::default()
        }
    }

    fn source(&self) -> DirectorySource {
        DirectorySource::new(self.source_dir.path())
    }

    fn write_microdata(&self, contents: &str) {
        let raw = self.data_dir.path().join("raw");
        fs::create_dir_all(&raw).unwrap();
        fs::write(raw.join("md_ESOC2023.csv"), contents).unwrap();
    }

    fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.data_dir.path().join(relative)).unwrap()
    }
}

fn file_exists(root: &Path, relative: &str) -> bool {
    root.join(relative).is_file()
}

#[test]
fn test_tidy_series_filters_reference_slice() {
    let fixture = Fixture::new();
    let series = tidy_series(
        &fixture.source(),
        &SeriesDefinition::municipal_waste(),
        "geo",
    )
    .unwrap();

    let keys: Vec<(&str, i32)> = series
        .points
        .iter()
        .map(|p| (p.group.as_str(), p.period))
        .collect();
    assert_eq!(
        keys,
        vec![
            ("ES", 2020),
            ("ES", 2021),
            ("EU27_2020", 2020),
            ("EU27_2020", 2021),
            ("EU27_2020", 2022),
        ]
    );
    assert_eq!(series.dropped, 3);
}

#[test]
fn test_statistical_series_products() {
    let fixture = Fixture::new();
    let summary = run_statistical_series(&fixture.config(), &fixture.source()).unwrap();

    assert_eq!(summary.written_count(), 3);
    insta::assert_snapshot!(fixture.read("external/eurostat_env_wasmun_ES_UE.csv"), @r"
    geo,year,residuos_kg_hab
    ES,2020,464
    ES,2021,472
    EU27_2020,2020,505
    EU27_2020,2021,513
    EU27_2020,2022,511
    ");
    insta::assert_snapshot!(fixture.read("external/eurostat_env_waspac_ES_UE.csv"), @r"
    geo,year,reciclaje_envases_pct
    ES,2021,70.3
    ES,2022,71.4
    EU27_2020,2022,65.4
    ");
    insta::assert_snapshot!(fixture.read("processed/es_ue_residuos_reciclaje.csv"), @r"
    geo,year,residuos_kg_hab,reciclaje_envases_pct
    ES,2020,464,
    ES,2021,472,70.3
    ES,2022,,71.4
    EU27_2020,2020,505,
    EU27_2020,2021,513,
    EU27_2020,2022,511,65.4
    ");
}

#[test]
fn test_statistical_series_rerun_is_byte_identical() {
    let fixture = Fixture::new();
    let config = fixture.config();

    run_statistical_series(&config, &fixture.source()).unwrap();
    let first = fixture.read("processed/es_ue_residuos_reciclaje.csv");
    run_statistical_series(&config, &fixture.source()).unwrap();
    let second = fixture.read("processed/es_ue_residuos_reciclaje.csv");

    assert_eq!(first, second);
}

#[test]
fn test_missing_dataset_writes_nothing() {
    let fixture = Fixture::new();
    fs::remove_file(fixture.source_dir.path().join("env_waspac.tsv")).unwrap();

    let err = run_statistical_series(&fixture.config(), &fixture.source()).unwrap_err();

    assert!(format!("{err:#}").contains("env_waspac"));
    assert!(!file_exists(
        fixture.data_dir.path(),
        "external/eurostat_env_wasmun_ES_UE.csv"
    ));
}

#[test]
fn test_microdata_missing_file_is_skipped() {
    let fixture = Fixture::new();
    let summary = run_microdata(&fixture.config()).unwrap();

    assert_eq!(summary.written_count(), 0);
    assert!(matches!(
        summary.products[0].status,
        ProductStatus::Skipped { .. }
    ));
    assert!(!fixture.data_dir.path().join("processed").exists());
}

#[test]
fn test_microdata_weighted_products() {
    let fixture = Fixture::new();
    fixture.write_microdata(
        "\u{feff}respalim;fep;MEDIDA1;medida2;edad\n\
         1;2;1;0;30\n\
         2;1;1;1;40\n\
         1;1;0;;50\n\
         3;;1;1;60\n",
    );

    let summary = run_microdata(&fixture.config()).unwrap();

    assert_eq!(summary.written_count(), 2);
    insta::assert_snapshot!(
        fixture.read("processed/esoc2023_motivos_desechar_alimentos_pct.csv"),
        @r"
    respalim,pct
    1,75
    2,25
    "
    );
    insta::assert_snapshot!(fixture.read("processed/esoc2023_medidas_reduccion_pct.csv"), @r"
    medida,pct
    MEDIDA1,75
    medida2,25
    ");
}

#[test]
fn test_microdata_uniform_fallback() {
    let fixture = Fixture::new();
    fixture.write_microdata("respalim;otra\nA;x\nA;y\nB;z\n");

    let summary = run_microdata(&fixture.config()).unwrap();

    let category = &summary.products[0];
    assert_eq!(category.notes, vec!["uniform".to_string()]);
    assert_eq!(
        fixture.read("processed/esoc2023_motivos_desechar_alimentos_pct.csv"),
        "respalim,pct\nA,66.7\nB,33.3\n"
    );
    // No medida* columns
    assert!(matches!(
        summary.products[1].status,
        ProductStatus::Skipped { .. }
    ));
}

#[test]
fn test_largest_remainder_rounding_totals_one_hundred() {
    let fixture = Fixture::new();
    fixture.write_microdata("respalim\nA\nB\nC\n");
    let mut config = fixture.config();
    config.microdata.rounding = RoundingMode::LargestRemainder;

    run_microdata(&config).unwrap();

    assert_eq!(
        fixture.read("processed/esoc2023_motivos_desechar_alimentos_pct.csv"),
        "respalim,pct\nA,33.4\nB,33.3\nC,33.3\n"
    );
}

#[test]
fn test_run_all_builds_every_product() {
    let fixture = Fixture::new();
    fixture.write_microdata("respalim;fep;medida1\n1;1;1\n2;1;0\n");

    let summary = run_all(&fixture.config(), &fixture.source()).unwrap();

    assert_eq!(summary.written_count(), 5);
}
