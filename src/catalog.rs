//! Static mapping from country to FRED series ids.
//!
//! The catalog is built once at startup and passed explicitly to consumers;
//! nothing mutates it at runtime.

use crate::error::InputError;
use crate::models::IndicatorKind;

/// One catalog row: display label (unique key, flag glyph + name) and the
/// three provider series ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryEntry {
    pub label: String,
    pub gdp: String,
    pub unemployment: String,
    pub inflation: String,
}

impl CountryEntry {
    pub fn series_id(&self, indicator: IndicatorKind) -> &str {
        match indicator {
            IndicatorKind::Gdp => &self.gdp,
            IndicatorKind::Unemployment => &self.unemployment,
            IndicatorKind::Inflation => &self.inflation,
        }
    }

    /// Country name without the leading flag glyph.
    pub fn bare_name(&self) -> &str {
        match self.label.split_once(' ') {
            Some((first, rest)) if first.chars().all(|c| !c.is_ascii()) => rest,
            _ => &self.label,
        }
    }
}

/// Immutable country catalog, ordered as presented to the user.
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    entries: Vec<CountryEntry>,
}

// (label, gdp, unemployment, inflation) FRED series ids.
const BUILTIN: &[(&str, &str, &str, &str)] = &[
    ("🇦🇷 Argentina", "ARGRGDPEXP", "LRHUTTTTARM156S", "FPCPITOTLZGAFA"),
    ("🇦🇺 Australia", "AUSGDPRQDSMEI", "LRHUTTTTAUM156S", "CPALTT01AUM659N"),
    ("🇦🇹 Austria", "AUTRGDPEXP", "LRHUTTTTAUM156S", "CPALTT01ATM659N"),
    ("🇧🇪 Belgium", "BENGDPRQDSMEI", "LRHUTTTTBEM156S", "CPALTT01BEM659N"),
    ("🇧🇷 Brazil", "BRARGDPEXP", "LRHUTTTTBRM156S", "FPCPITOTLZGBRA"),
    ("🇨🇦 Canada", "NGDPRSAXDCCAQ", "LRHUTTTTCAM156S", "CPALTT01CAM659N"),
    ("🇨🇱 Chile", "CHLRGDPEXP", "LRHUTTTTCLM156S", "FPCPITOTLZGCHL"),
    ("🇨🇳 China", "CHNRGDPEXP", "LRHUTTTTCNM156S", "FPCPITOTLZGCHN"),
    ("🇨🇴 Colombia", "COLRGDPEXP", "LRHUTTTTCLM156S", "FPCPITOTLZGCOL"),
    ("🇨🇷 Costa Rica", "CRIRGDPEXP", "LRHUTTTTCRM156S", "FPCPITOTLZGCRI"),
    ("🇨🇿 Czech Republic", "CZEARGDPEXP", "LRHUTTTTCZM156S", "CPALTT01CZM659N"),
    ("🇩🇰 Denmark", "DNKRGDPEXP", "LRHUTTTTDEM156S", "CPALTT01DKM659N"),
    ("🇪🇨 Ecuador", "ECURGDPEXP", "LRHUTTTTECM156S", "FPCPITOTLZGECU"),
    ("🇪🇪 Estonia", "ESTRGDPEXP", "LRHUTTTTEST156S", "CPALTT01EEM659N"),
    ("🇫🇮 Finland", "FINRGDPEXP", "LRHUTTTTFIM156S", "CPALTT01FIM659N"),
    ("🇫🇷 France", "CLVMNACSCAB1GQFR", "LRHUTTTTFRM156S", "CPALTT01FRM659N"),
    ("🇩🇪 Germany", "CLVMNACSCAB1GQDE", "LRHUTTTTDEM156S", "CPALTT01DEM659N"),
    ("🇬🇷 Greece", "GRCARGDPEXP", "LRHUTTTTGRM156S", "CPALTT01GRM659N"),
    ("🇭🇰 Hong Kong", "HKGARGDPEXP", "LRHUTTTTHKM156S", "FPCPITOTLZGHKG"),
    ("🇭🇺 Hungary", "HUNRGDPEXP", "LRHUTTTTHUM156S", "CPALTT01HUM659N"),
    ("🇮🇸 Iceland", "ISLRGDPEXP", "LRHUTTTTISM156S", "CPALTT01ISM659N"),
    ("🇮🇳 India", "INDRGDPEXP", "LRHUTTTTINM156S", "FPCPITOTLZGIN"),
    ("🇮🇩 Indonesia", "IDNRGDPEXP", "LRHUTTTTIDM156S", "FPCPITOTLZGIDN"),
    ("🇮🇪 Ireland", "IRLRGDPEXP", "LRHUTTTTIRM156S", "CPALTT01IRM659N"),
    ("🇮🇱 Israel", "ISRRGDPEXP", "LRHUTTTTILM156S", "FPCPITOTLZGISR"),
    ("🇮🇹 Italy", "ITARGDPEXP", "LRHUTTTTITM156S", "CPALTT01ITM659N"),
    ("🇯🇵 Japan", "JPNRGDPEXP", "LRHUTTTTJPM156S", "CPALTT01JPM659N"),
    ("🇰🇪 Kenya", "KENRGDPEXP", "LRHUTTTTKEM156S", "FPCPITOTLZGKEN"),
    ("🇰🇷 South Korea", "KORRGDPEXP", "LRHUTTTTKRM156S", "CPALTT01KRM659N"),
    ("🇱🇻 Latvia", "LVARGDPEXP", "LRHUTTTTLVM156S", "CPALTT01LVM659N"),
    ("🇱🇹 Lithuania", "LTURGPDPEXP", "LRHUTTTTLTM156S", "CPALTT01LTM659N"),
    ("🇲🇾 Malaysia", "MYSRGDPEXP", "LRHUTTTTMYM156S", "FPCPITOTLZGMYS"),
    ("🇲🇽 Mexico", "MEXRGDPEXP", "LRHUTTTTMXM156S", "FPCPITOTLZGMEX"),
    ("🇳🇱 Netherlands", "NLDRGDPEXP", "LRHUTTTTNLM156S", "CPALTT01NLM659N"),
    ("🇳🇿 New Zealand", "NZLRGDPEXP", "LRHUTTTTNZM156S", "CPALTT01NZM659N"),
    ("🇳🇴 Norway", "NORRGDPEXP", "LRHUTTTTNOM156S", "CPALTT01NOM659N"),
    ("🇵🇰 Pakistan", "PAKRGDPEXP", "LRHUTTTTPKM156S", "FPCPITOTLZGPak"),
    ("🇵🇭 Philippines", "PHLRGDPEXP", "LRHUTTTTPHM156S", "FPCPITOTLZGPHL"),
    ("🇵🇱 Poland", "POLRGDPEXP", "LRHUTTTTPLM156S", "CPALTT01PLM659N"),
    ("🇵🇹 Portugal", "PORRGDPEXP", "LRHUTTTTPRM156S", "CPALTT01PRM659N"),
    ("🇷🇴 Romania", "ROMRGDPEXP", "LRHUTTTTROM156S", "CPALTT01ROM659N"),
    ("🇷🇺 Russia", "RUSRRGDPEXP", "LRHUTTTTRUM156S", "FPCPITOTLZGRUS"),
    ("🇸🇦 Saudi Arabia", "SAURGDPEXP", "LRHUTTTTSAM156S", "FPCPITOTLZGSAU"),
    ("🇿🇦 South Africa", "ZAFRGDPEXP", "LRHUTTTTZAM156S", "FPCPITOTLZGZAF"),
    ("🇪🇸 Spain", "ESPGDPRQDSMEI", "LRHUTTTTESM156S", "CPALTT01ESM659N"),
    ("🇸🇪 Sweden", "SWENGDPRQDSMEI", "LRHUTTTTSEM156S", "CPALTT01SEM659N"),
    ("🇨🇭 Switzerland", "CHEGDPRQDSMEI", "LRHUTTTTCHM156S", "CPALTT01CHM659N"),
    ("🇹🇷 Turkey", "TURRGDPEXP", "LRHUTTTTTRM156S", "FPCPITOTLZGTR"),
    ("🇬🇧 United Kingdom", "UKNGDP", "LRHUTTTTGBM156S", "CPALTT01GBM659N"),
    ("🇺🇸 United States", "GDPC1", "UNRATE", "CPALTT01USM657N"),
];

impl CountryCatalog {
    /// Catalog of known working countries.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(label, gdp, unemployment, inflation)| CountryEntry {
                label: (*label).to_string(),
                gdp: (*gdp).to_string(),
                unemployment: (*unemployment).to_string(),
                inflation: (*inflation).to_string(),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look a country up by its full label, or by the bare name without the
    /// flag glyph, case-insensitively.
    pub fn find(&self, name: &str) -> Option<&CountryEntry> {
        let wanted = name.trim().to_lowercase();
        self.entries.iter().find(|e| {
            e.label.to_lowercase() == wanted || e.bare_name().to_lowercase() == wanted
        })
    }

    /// Resolve user-supplied country names into catalog entries, preserving
    /// the given order.
    pub fn resolve(&self, names: &[String]) -> Result<Vec<CountryEntry>, InputError> {
        if names.is_empty() {
            return Err(InputError::EmptyCountryList);
        }
        names
            .iter()
            .map(|name| {
                self.find(name)
                    .cloned()
                    .ok_or_else(|| InputError::UnknownCountry(name.clone()))
            })
            .collect()
    }
}
