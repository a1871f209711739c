//! テスト用患者データと、そこから導出される表示用の値。
//!
//! 患者テーブルはシードデータ (`R__seed_test_data.sql`) と同じ20件を保持します。

/// テスト用の患者レコード。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patient {
    pub id: u32,
    pub first_name: &'static str,
    pub last_name: &'static str,
    /// `DPI-` プレフィックス付きの識別番号。
    pub dpi: &'static str,
    /// `"M"` または `"F"`。
    pub sex: &'static str,
}

const fn patient(
    id: u32,
    first_name: &'static str,
    last_name: &'static str,
    dpi: &'static str,
    sex: &'static str,
) -> Patient {
    Patient {
        id,
        first_name,
        last_name,
        dpi,
        sex,
    }
}

/// 画像を生成する患者の一覧（テーブル順に処理されます）。
pub const PATIENTS: [Patient; 20] = [
    patient(1, "Juan", "Perez Gonzalez", "DPI-1234567890101", "M"),
    patient(2, "Maria", "Santos Lopez", "DPI-2345678901202", "F"),
    patient(3, "Pedro", "Garcia Hernandez", "DPI-3456789012303", "M"),
    patient(4, "Ana", "Martinez Ruiz", "DPI-4567890123404", "F"),
    patient(5, "Luis", "Morales Castro", "DPI-5678901234505", "M"),
    patient(6, "Carmen", "Flores Mejia", "DPI-6789012345606", "F"),
    patient(7, "Roberto", "Diaz Vargas", "DPI-7890123456707", "M"),
    patient(8, "Sofia", "Ramirez Paz", "DPI-8901234567808", "F"),
    patient(9, "Miguel", "Torres Luna", "DPI-9012345678909", "M"),
    patient(10, "Elena", "Sanchez Rivas", "DPI-0123456789010", "F"),
    patient(11, "Francisco", "Mendoza Aguilar", "DPI-1234509876111", "M"),
    patient(12, "Isabella", "Cruz Monzon", "DPI-2345610987212", "F"),
    patient(13, "Andres", "Ortiz Barrios", "DPI-3456721098313", "M"),
    patient(14, "Gabriela", "Reyes Soto", "DPI-4567832109414", "F"),
    patient(15, "Oscar", "Vasquez Pineda", "DPI-5678943210515", "M"),
    patient(16, "Patricia", "Herrera Godinez", "DPI-6789054321616", "F"),
    patient(17, "Diego", "Castillo Moreno", "DPI-7890165432717", "M"),
    patient(18, "Valentina", "Estrada Juarez", "DPI-8901276543818", "F"),
    patient(19, "Alejandro", "Nunez Cordova", "DPI-9012387654919", "M"),
    patient(20, "Lucia", "Alvarez Monroy", "DPI-0123498765020", "F"),
];

impl Patient {
    /// 表示用のCUI番号を返します（例: `"1234 56789 0101"`）。
    ///
    /// `DPI-` を取り除いた数字列を 4桁・5桁・残り の3グループに分けます。
    /// 桁数が足りない場合は、短い（または空の）グループになるだけでパニックはしません。
    pub fn formatted_cui(&self) -> String {
        format_cui(self.dpi)
    }

    /// 性別欄に表示する文字列。
    pub fn sex_label(&self) -> &'static str {
        sex_label(self.sex)
    }

    /// 出力ファイル名 (`dpi_<名>_<姓の最初の語>.jpg`、すべて小文字)。
    pub fn file_name(&self) -> String {
        let first = self.first_name.to_lowercase();
        let last = self
            .last_name
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_lowercase();
        format!("dpi_{}_{}.jpg", first, last)
    }
}

pub fn format_cui(dpi: &str) -> String {
    let digits: Vec<char> = dpi.replace("DPI-", "").chars().collect();
    // 文字単位で切り出すので、範囲外でも空スライスになる
    let group = |start: usize, end: usize| -> String {
        let end = end.min(digits.len());
        let start = start.min(end);
        digits[start..end].iter().collect()
    };
    format!(
        "{} {} {}",
        group(0, 4),
        group(4, 9),
        group(9, digits.len())
    )
}

pub fn sex_label(code: &str) -> &'static str {
    if code == "M" {
        "MASCULINO"
    } else {
        "FEMENINO"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn format_cui_groups_digits_4_5_rest() {
        assert_eq!(format_cui("DPI-1234567890101"), "1234 56789 0101");
    }

    #[test]
    fn format_cui_tolerates_short_input() {
        assert_eq!(format_cui("DPI-123"), "123  ");
        assert_eq!(format_cui(""), "  ");
        assert_eq!(format_cui("DPI-123456"), "1234 56 ");
    }

    #[test]
    fn sex_label_maps_codes() {
        assert_eq!(sex_label("M"), "MASCULINO");
        assert_eq!(sex_label("F"), "FEMENINO");
        // M 以外はすべて女性扱い
        assert_eq!(sex_label("X"), "FEMENINO");
    }

    #[test]
    fn file_name_uses_first_token_of_last_name() {
        let p = PATIENTS[0];
        assert_eq!(p.file_name(), "dpi_juan_perez.jpg");
        assert_eq!(PATIENTS[19].file_name(), "dpi_lucia_alvarez.jpg");
    }

    #[test]
    fn file_name_with_empty_last_name() {
        let p = patient(99, "Solo", "  ", "DPI-0000000000000", "M");
        assert_eq!(p.file_name(), "dpi_solo_.jpg");
    }

    /// テーブルの20件はすべて異なるファイル名になることを確認します。
    #[test]
    fn patient_table_yields_twenty_unique_file_names() {
        let names: HashSet<String> = PATIENTS.iter().map(|p| p.file_name()).collect();
        assert_eq!(names.len(), 20);
        let ids: Vec<u32> = PATIENTS.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=20).collect::<Vec<u32>>());
    }

    #[test]
    fn patient_helpers_delegate() {
        let maria = PATIENTS[1];
        assert_eq!(maria.formatted_cui(), "2345 67890 1202");
        assert_eq!(maria.sex_label(), "FEMENINO");
    }
}
