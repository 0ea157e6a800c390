//! Supported Moroccan cities.

/// Cities the weather tool accepts, in display order.
pub const MOROCCAN_CITIES: [&str; 30] = [
    "Casablanca",
    "Rabat",
    "Marrakech",
    "Fès",
    "Tanger",
    "Agadir",
    "Meknès",
    "Oujda",
    "Kenitra",
    "Tétouan",
    "Safi",
    "El Jadida",
    "Nador",
    "Mohammedia",
    "Béni Mellal",
    "Taza",
    "Khemisset",
    "Taourirt",
    "Berkane",
    "Larache",
    "Khouribga",
    "Ouarzazate",
    "Settat",
    "Essaouira",
    "Ksar El Kebir",
    "Tiflet",
    "Berrechid",
    "Khénifra",
    "Taroudant",
    "Chefchaouen",
];

/// Returns the supported cities as owned strings, preserving order.
pub fn available_cities() -> Vec<String> {
    MOROCCAN_CITIES.iter().map(|c| c.to_string()).collect()
}

/// Case-insensitive membership check against [`MOROCCAN_CITIES`].
///
/// Uses Unicode lowercasing so accented names such as `"fès"` match.
pub fn is_supported_city(city: &str) -> bool {
    let wanted = city.to_lowercase();
    MOROCCAN_CITIES.iter().any(|c| c.to_lowercase() == wanted)
}
