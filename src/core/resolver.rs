use crate::utils::error::{EtlError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Logo image → restaurant name. The lunch guide only shows logos, so this is
/// the only place names come from. Names keep their HTML entities.
const BUILTIN_NAMES: &[(&str, &str)] = &[
    // Falun
    ("lunchlogo/club-etage.gif", "Club Etage"),
    ("lunchlogo/chinathai.gif", "Restaurang China Thai"),
    ("lunchlogo/hemkop.gif", "Hemk&ouml;p"),
    ("lunchlogo/LugnetMatEvent.gif", "Lugnet Mat &amp; Event"),
    ("lunchlogo/Z-KROG.gif", "Z-krog"),
    ("lunchlogo/City_Life.gif", "City Life"),
    ("lunchlogo/geschwornergarden_09.gif", "Geschwornerg&auml;rden"),
    ("lunchlogo/Gamla-staberg-2010.gif", "Gamla Staberg"),
    ("lunchlogo/koppis.gif", "Restaurang Koppis"),
    ("lunchlogo/carianna.gif", "Restaurang Cari Anna"),
    ("lunchlogo/marianns_05.gif", "Mariann's Saloon"),
    ("lunchlogo/dalasalen_dalreg.gif", "Dalasalen"),
    ("lunchlogo/kuselska-rappans.gif", "K&uuml;selska Krogen"),
    ("lunchlogo/framby-udde-2.gif", "Runns aktivitetscenter"),
    ("lunchlogo/hammars.gif", "Hammars"),
    ("lunchlogo/Restaurang_Chapeau_dor.gif", "Chapeau d'or"),
    ("lunchlogo/ah.gif", "&Aring;h"),
    ("lunchlogo/haganas.gif", "Hagan&auml;s"),
    ("lunchlogo/Pitchers.gif", "Pitchers"),
    ("lunchlogo/Dossbergets-vardshus.gif", "D&ouml;ssbergets v&auml;rdshus"),
    ("lunchlogo/trotzgatan3.gif", "Trotzgatan 3"),
    ("lunchlogo/Victuscella.gif", "Victuscella"),
    ("lunchlogo/Scandic_lugnet.gif", "Scandic"),
    ("lunchlogo/HettoVilt.gif", "Hett &amp; Vilt"),
    ("lunchlogo/Yrkesakademin.gif", "Yrkesakademin"),
    // Borlänge
    ("lunchlogo/BlgHV.gif", "Borl&auml;nge Hotel &amp; V&auml;rdshus"),
    ("lunchlogo/liljan.gif", "Restaurang Liljan"),
    ("lunchlogo/Tzatziki-blge.gif", "Tzatziki"),
    ("lunchlogo/thai-o-sushi.gif", "Restaurang Thai &amp; Sushi"),
    ("lunchlogo/Dalaflyget.gif", "Dalaflyget"),
    ("lunchlogo/subway.gif", "Subway"),
    ("lunchlogo/buskakersgastgiv.gif", "Busk&aring;kers G&auml;stgifvarg&aring;rd"),
    ("lunchlogo/matpalatset.gif", "Matpalatset"),
    ("lunchlogo/octaven_logo.gif", "Restaurang Octaven"),
    ("lunchlogo/bla_lagan.gif", "Bl&aring; L&aring;gan"),
    ("lunchlogo/coop_forum.gif", "Coop Forum"),
    ("lunchlogo/Festmakarna06.gif", "Festmakarna"),
    ("lunchlogo/kok-nystrom.gif", "K&ouml;k Nystr&ouml;m restaurang &amp; catering"),
    ("lunchlogo/Lilla-Krogen_2010.gif", "Gamla Lilla Krogen Werners"),
    ("lunchlogo/matopotatis.gif", "Mat &amp; Potatis"),
    ("lunchlogo/Officerssalongen-2010.gif", "Officiersalongen"),
    ("lunchlogo/Restaurang-Fortuna-09.gif", "Restaurang Fortuna"),
    ("lunchlogo/Sushilovers.gif", "Sushi Lovers"),
    ("lunchlogo/travinn.gif", "Trav Inn"),
    ("lunchlogo/ya.gif", "Yrkesakademin"),
    ("lunchlogo/Scandic_blge.gif", "Scandic"),
    ("lunchlogo/TeknikdRest.gif", "Teknikdalens Restaurang"),
    ("lunchlogo/Broken-Dreams-borlange.gif", "Broken Dreams"),
    ("lunchlogo/Wild_West_Restaurang.gif", "Wild West Restaurang"),
    ("lunchlogo/The-Rock-House.gif", "The Rock House"),
    ("lunchlogo/Mathornan-Galaxen.gif", "Math&ouml;rnan Galaxen"),
    ("lunchlogo/bragematsalen.gif", "Brage Matsalen"),
    ("lunchlogo/matlagarna.gif", "Matlagarna"),
    // Ludvika
    ("lunchlogo/Ahlens_cafe.gif", "&Aringhl&eacute;ns caf&eacute;"),
    ("lunchlogo/Gallerian.gif", "Restaurang &amp; Cafe Gallerian"),
    ("lunchlogo/Hagge_Golfkrog_20105.gif", "Hagge Golfkrog"),
    ("lunchlogo/Kan-Elen-logo.gif", "Kan Elen"),
    ("lunchlogo/Piren_2009.gif", "Restaurang Piren"),
    ("lunchlogo/pizzeria_milano.gif", "Pizzeria Milano"),
    ("lunchlogo/silverdollar.gif", "Silverdollar"),
    ("lunchlogo/smedjebackens-wardshus.gif", "Smedjebackens W&auml;rdshus"),
    ("lunchlogo/Stations_Kiosken.gif", "Stations Kiosken"),
    ("lunchlogo/stopet.gif", "Hotell &amp; V&aumlrdshus Stopet"),
    ("lunchlogo/Sussis-Mat.gif", "Sussi's Mat &amp; Catering"),
    ("lunchlogo/Wanbo-Herrgard.gif", "Wanbo Herrg&aring;rd"),
    ("lunchlogo/Viljan-cafe.gif", "Viljan"),
    ("lunchlogo/Gourmet.gif", "Restaurang Gourmet Pizzeria"),
    ("lunchlogo/Kyrkogatan-no-9.gif", "Kyrkogatan no. 9"),
    ("lunchlogo/McDonalds2010.gif", "McDonalds"),
    // Mora
    ("lunchlogo/Backa-Herrgard_09.gif", "B&auml;cka Herrg&aring;rd"),
    ("lunchlogo/bykrogen2.gif", "Bykrogen"),
    ("lunchlogo/Cafe_Oscar.gif", "Restaurang &amp; Caf&eacute; Oscar"),
    ("lunchlogo/Hotell-Alvdalen.gif", "Hotell &Auml;lvdalen"),
    ("lunchlogo/hotell-kung-gosta.gif", "Hotell Kung G&ouml;sta"),
    ("lunchlogo/moraparken.gif", "Mora Parken"),
    ("lunchlogo/Orsa_Stadshotell.gif", "Orsa Stadshotell"),
    ("lunchlogo/Strand-kok-o-bar.gif", "strand K&ouml;k &amp; Bar"),
    ("lunchlogo/Vasagatan-32.gif", "Restaurang Vasagatan 32"),
    ("lunchlogo/Wasastugan.gif", "Restaurang Wasastugan"),
    ("lunchlogo/vi_pa_hornet.gif", "Vi p&aring; H&ouml;rnet"),
    ("lunchlogo/Orsa-Stadshotell.gif", "Orsa Stadshotell"),
    ("lunchlogo/FM-Mattson.gif", "FM Mattsson arena"),
    ("lunchlogo/Noret-Restaurang.gif", "Noret Restaurang &amp; Pizzeria"),
    ("lunchlogo/Pasha-restaurang2010.gif", "Pasha Restaurang &amp; Pizzeria"),
    ("lunchlogo/Famous-Moose-Restaurang.gif", "Famous Moose"),
    ("lunchlogo/Jacob.gif", "Jacob restaurang &amp; bar"),
    ("lunchlogo/Ljungbergs-Sportsbar.gif", "Ljungbergs sportsbar"),
    ("lunchlogo/Wibe-Restaurangen.gif", "Wibe Restaurangen"),
    // Säter / Hedemora
    ("lunchlogo/akropolis_sdt.gif", "Restaurang Akropolis"),
    ("lunchlogo/bla-lagunen.gif", "Bl&aring; Lagunen"),
    ("lunchlogo/lappens.gif", "Lappens V&auml;gkrog"),
    ("lunchlogo/restaurang-skonvik.gif", "Restaurang Sk&ouml;nvik"),
    ("lunchlogo/The_Kings_Arms_2.gif", "The Kings Arms"),
    ("lunchlogo/Restaurang-Tjarna-Brunn.gif", "Restaurang Tj&auml;rna Brunn"),
    ("lunchlogo/tjarna-brunn.gif", "Restaurang Tj&auml;rna Brunn"),
    ("lunchlogo/Pizzeria-Athena.gif", "Pizzeria Athena"),
];

/// Layout of a names file:
///
/// ```toml
/// [restaurants]
/// "lunchlogo/new-place.gif" = "New Place"
/// ```
#[derive(Debug, Deserialize)]
struct NamesFile {
    #[serde(default)]
    restaurants: HashMap<String, String>,
}

/// Exact, case-sensitive lookup from logo image reference to restaurant name.
#[derive(Debug, Clone, Default)]
pub struct NameTable {
    names: HashMap<String, String>,
}

impl NameTable {
    pub fn builtin() -> Self {
        let names = BUILTIN_NAMES
            .iter()
            .map(|(image, name)| (image.to_string(), name.to_string()))
            .collect();
        Self { names }
    }

    /// Built-in table with a names file merged on top of it.
    pub fn builtin_with_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut table = Self::builtin();
        let content = std::fs::read_to_string(&path)?;
        let added = table.extend_from_toml(&content)?;
        tracing::info!(
            "📇 Loaded {} extra restaurant names from {}",
            added,
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Merges a names file; entries there win over existing ones.
    pub fn extend_from_toml(&mut self, content: &str) -> Result<usize> {
        let file: NamesFile = toml::from_str(content).map_err(|e| EtlError::ConfigValidationError {
            field: "names".to_string(),
            message: format!("TOML parsing error: {}", e),
        })?;
        let added = file.restaurants.len();
        self.names.extend(file.restaurants);
        Ok(added)
    }

    pub fn resolve(&self, image_reference: &str) -> Option<&str> {
        self.names.get(image_reference).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keys_are_unique() {
        assert_eq!(NameTable::builtin().len(), BUILTIN_NAMES.len());
    }

    #[test]
    fn test_exact_match() {
        let table = NameTable::builtin();
        assert_eq!(table.resolve("lunchlogo/club-etage.gif"), Some("Club Etage"));
        assert_eq!(table.resolve("lunchlogo/hemkop.gif"), Some("Hemk&ouml;p"));
        assert_eq!(
            table.resolve("lunchlogo/tjarna-brunn.gif"),
            table.resolve("lunchlogo/Restaurang-Tjarna-Brunn.gif")
        );
    }

    #[test]
    fn test_no_normalisation() {
        let table = NameTable::builtin();
        assert_eq!(table.resolve("lunchlogo/CLUB-ETAGE.gif"), None);
        assert_eq!(table.resolve("club-etage.gif"), None);
        assert_eq!(table.resolve(" lunchlogo/club-etage.gif"), None);
        assert_eq!(table.resolve("lunchlogo/club-etage"), None);
    }

    #[test]
    fn test_resolve_is_stable() {
        let table = NameTable::builtin();
        for (image, _) in BUILTIN_NAMES {
            assert_eq!(table.resolve(image), table.resolve(image));
        }
        assert_eq!(table.resolve("lunchlogo/unknown.gif"), None);
        assert_eq!(table.resolve("lunchlogo/unknown.gif"), None);
    }

    #[test]
    fn test_extend_from_toml() {
        let mut table = NameTable::builtin();
        let added = table
            .extend_from_toml(
                r#"
[restaurants]
"lunchlogo/nya-krogen.gif" = "Nya Krogen"
"lunchlogo/subway.gif" = "Subway Borl&auml;nge"
"#,
            )
            .unwrap();

        assert_eq!(added, 2);
        assert_eq!(table.resolve("lunchlogo/nya-krogen.gif"), Some("Nya Krogen"));
        assert_eq!(table.resolve("lunchlogo/subway.gif"), Some("Subway Borl&auml;nge"));
        assert_eq!(table.len(), BUILTIN_NAMES.len() + 1);
    }

    #[test]
    fn test_extend_rejects_bad_toml() {
        let mut table = NameTable::builtin();
        assert!(table.extend_from_toml("[restaurants\n").is_err());
        assert_eq!(table.len(), BUILTIN_NAMES.len());
    }

    #[test]
    fn test_builtin_with_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[restaurants]\n\"lunchlogo/ny.gif\" = \"Ny\"\n").unwrap();

        let table = NameTable::builtin_with_file(file.path()).unwrap();
        assert_eq!(table.resolve("lunchlogo/ny.gif"), Some("Ny"));
    }
}
