use serde::Serialize;

/// Static narrative attached to a maturity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelContent {
    pub level: u8,
    pub name: &'static str,
    pub description: &'static str,
    pub characteristics: [&'static str; 2],
    pub next_steps: [&'static str; 3],
    pub color: &'static str,
}

/// Five-level content table for one deployment variant.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct LevelCatalog {
    levels: [LevelContent; 5],
}

impl LevelCatalog {
    pub fn content(&self, level: u8) -> Option<&LevelContent> {
        self.levels.iter().find(|content| content.level == level)
    }

    pub fn levels(&self) -> &[LevelContent; 5] {
        &self.levels
    }
}

pub const INVALID_LEVEL_NAME: &str = "Invalid";
pub const INVALID_LEVEL_COLOR: &str = "#757575";
pub const INVALID_LEVEL_NEXT_STEP: &str = "Periksa kembali perhitungan skor";

pub static RESCALED_RANGE_LEVELS: LevelCatalog = LevelCatalog {
    levels: [
        LevelContent {
            level: 1,
            name: "Awareness",
            description: "RS baru menyadari potensi AI",
            characteristics: [
                "Belum ada inisiatif konkret",
                "Fokus: Education dan awareness building",
            ],
            next_steps: [
                "Edukasi manajemen dan staf mengenai potensi AI di layanan kesehatan",
                "Selenggarakan workshop atau webinar pengenalan AI",
                "Petakan area sederhana yang cocok untuk dijadikan pilot project",
            ],
            color: "#ff6b6b",
        },
        LevelContent {
            level: 2,
            name: "Exploration",
            description: "Pilot project terbatas dan eksperimen awal",
            characteristics: [
                "Investasi minimal untuk proof of concept",
                "Fokus: Learning dan experimentation",
            ],
            next_steps: [
                "Implementasikan 1\u{2013}2 pilot project AI di area terbatas",
                "Tinjau hasil dan dokumentasikan pembelajaran yang diperoleh",
                "Susun strategi awal untuk pengembangan AI ke depan",
            ],
            color: "#ffa726",
        },
        LevelContent {
            level: 3,
            name: "Implementation",
            description: "Beberapa solusi AI berjalan operasional",
            characteristics: [
                "Mulai ada governance dan standar",
                "Fokus: Standardisasi dan integrasi sistem",
            ],
            next_steps: [
                "Standarkan proses AI yang sudah berjalan agar lebih stabil",
                "Bentuk tim internal yang bertanggung jawab atas tata kelola AI",
                "Perluas penerapan AI ke unit atau proses lainnya",
            ],
            color: "#66bb6a",
        },
        LevelContent {
            level: 4,
            name: "Scale-Up",
            description: "AI terintegrasi dalam operasional utama",
            characteristics: [
                "Ada strategy roadmap dan resource dedicated",
                "Fokus: Optimisasi dan ekspansi",
            ],
            next_steps: [
                "Susun roadmap strategis untuk implementasi AI secara menyeluruh",
                "Perkuat kompetensi SDM melalui pelatihan dan perekrutan khusus",
                "Bangun sistem pemantauan berkala untuk mengevaluasi dampak AI",
            ],
            color: "#42a5f5",
        },
        LevelContent {
            level: 5,
            name: "Transformation",
            description: "AI menjadi core competitive advantage",
            characteristics: [
                "Continuous innovation dan improvement",
                "Fokus: Leadership dan best practices",
            ],
            next_steps: [
                "Jadikan RS sebagai pusat unggulan (center of excellence) untuk AI",
                "Bentuk unit riset atau laboratorium AI internal",
                "Berkolaborasi dengan RS lain dan institusi riset untuk berbagi praktik terbaik",
            ],
            color: "#ab47bc",
        },
    ],
};

pub static PERCENTAGE_LEVELS: LevelCatalog = LevelCatalog {
    levels: [
        LevelContent {
            level: 1,
            name: "Awareness",
            description: "Kesadaran awal terhadap pemanfaatan AI di rumah sakit",
            characteristics: [
                "Pemahaman AI masih terbatas pada level individu",
                "Fokus: Literasi AI bagi pimpinan dan staf",
            ],
            next_steps: [
                "Lakukan sosialisasi manfaat dan risiko AI kepada pimpinan RS",
                "Identifikasi champion AI di tiap unit kerja",
                "Inventarisasi data dan sistem informasi yang sudah tersedia",
            ],
            color: "#ef5350",
        },
        LevelContent {
            level: 2,
            name: "Exploration",
            description: "Uji coba AI dimulai pada kasus penggunaan terbatas",
            characteristics: [
                "Pilot berjalan tanpa anggaran khusus",
                "Fokus: Validasi manfaat dan kelayakan teknis",
            ],
            next_steps: [
                "Tetapkan kriteria keberhasilan untuk setiap pilot AI",
                "Siapkan kebijakan awal perlindungan data pasien",
                "Alokasikan anggaran terukur untuk eksperimen lanjutan",
            ],
            color: "#ff9800",
        },
        LevelContent {
            level: 3,
            name: "Implementation",
            description: "Solusi AI digunakan dalam proses layanan sehari-hari",
            characteristics: [
                "Tata kelola dan standar operasional mulai diterapkan",
                "Fokus: Integrasi dengan SIMRS dan alur kerja klinis",
            ],
            next_steps: [
                "Integrasikan solusi AI dengan SIMRS dan rekam medis elektronik",
                "Bentuk komite tata kelola dan etika AI",
                "Ukur dampak AI terhadap mutu layanan dan efisiensi",
            ],
            color: "#4caf50",
        },
        LevelContent {
            level: 4,
            name: "Scale-Up",
            description: "AI diperluas lintas unit dengan dukungan strategi formal",
            characteristics: [
                "Roadmap AI terhubung dengan rencana strategis RS",
                "Fokus: Skalabilitas dan keberlanjutan",
            ],
            next_steps: [
                "Standarkan platform data dan MLOps untuk seluruh unit",
                "Kembangkan jalur karier dan pelatihan khusus talenta AI",
                "Evaluasi portofolio AI secara berkala berdasarkan nilai klinis",
            ],
            color: "#2196f3",
        },
        LevelContent {
            level: 5,
            name: "Transformation",
            description: "AI menjadi pendorong utama transformasi layanan",
            characteristics: [
                "Inovasi AI berkelanjutan dan terukur",
                "Fokus: Kepemimpinan ekosistem dan praktik terbaik",
            ],
            next_steps: [
                "Publikasikan hasil dan praktik terbaik AI ke jejaring RS",
                "Kembangkan kemitraan riset dengan universitas dan industri",
                "Jadikan AI bagian dari model bisnis dan layanan unggulan RS",
            ],
            color: "#9c27b0",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogs_cover_levels_one_through_five_in_order() {
        for catalog in [&RESCALED_RANGE_LEVELS, &PERCENTAGE_LEVELS] {
            let numbers: Vec<u8> = catalog.levels().iter().map(|content| content.level).collect();
            assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
            assert!(catalog.content(0).is_none());
        }
    }

    #[test]
    fn both_catalogs_share_level_names() {
        for level in 1..=5 {
            let a = RESCALED_RANGE_LEVELS.content(level).expect("variant a level");
            let b = PERCENTAGE_LEVELS.content(level).expect("variant b level");
            assert_eq!(a.name, b.name);
        }
    }
}
