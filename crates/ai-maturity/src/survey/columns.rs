use super::normalizer::normalize_header;
use crate::assessment::DimensionKey;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Logical survey field, independent of the export's header spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum SurveyColumn {
    SubmissionId,
    Dimension(DimensionKey),
    RespondentName,
    Position,
    HospitalName,
    HospitalLocation,
    BedCount,
}

impl SurveyColumn {
    pub(crate) fn required() -> Vec<Self> {
        let mut columns = vec![Self::SubmissionId];
        columns.extend(DimensionKey::ordered().into_iter().map(Self::Dimension));
        columns.extend([Self::RespondentName, Self::Position, Self::HospitalName]);
        columns
    }

    pub(crate) fn canonical_name(self) -> String {
        match self {
            Self::SubmissionId => "Submission ID".to_string(),
            Self::Dimension(key) => key.column_label(),
            Self::RespondentName => "Nama Responden".to_string(),
            Self::Position => "Jabatan".to_string(),
            Self::HospitalName => "Nama Rumah Sakit".to_string(),
            Self::HospitalLocation => "Lokasi Rumah Sakit".to_string(),
            Self::BedCount => "Jumlah Tempat Tidur".to_string(),
        }
    }
}

static HEADER_MAP: OnceLock<HashMap<String, SurveyColumn>> = OnceLock::new();

pub(crate) fn column_for_header(header: &str) -> Option<SurveyColumn> {
    header_map().get(&normalize_header(header)).copied()
}

fn header_map() -> &'static HashMap<String, SurveyColumn> {
    HEADER_MAP.get_or_init(|| {
        const ALTERNATE_NAMES: &[(&str, SurveyColumn)] = &[
            ("Lokasi RS:", SurveyColumn::HospitalLocation),
            ("Lokasi RS", SurveyColumn::HospitalLocation),
            ("Nama Responden:", SurveyColumn::RespondentName),
            ("Jabatan:", SurveyColumn::Position),
            ("Nama Rumah Sakit:", SurveyColumn::HospitalName),
            ("Jumlah Tempat Tidur:", SurveyColumn::BedCount),
        ];

        let mut map = HashMap::new();
        let mut columns = SurveyColumn::required();
        columns.extend([SurveyColumn::HospitalLocation, SurveyColumn::BedCount]);
        for column in columns {
            map.insert(normalize_header(&column.canonical_name()), column);
        }
        for key in DimensionKey::ordered() {
            map.insert(
                normalize_header(&format!("Skor Dimensi {}", key.number())),
                SurveyColumn::Dimension(key),
            );
        }
        for (name, column) in ALTERNATE_NAMES {
            map.insert(normalize_header(name), *column);
        }
        map
    })
}
