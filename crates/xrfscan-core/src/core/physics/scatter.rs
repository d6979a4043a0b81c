/// Electron rest energy in keV.
pub const ELECTRON_REST_ENERGY_KEV: f64 = 511.0;

/// Compton-scattered photon energy for an incident energy and scattering angle.
///
/// E' = E / (1 + (E / 511)(1 - cos(theta))). The scattered energy never exceeds
/// the incident energy.
#[inline]
pub fn compton_energy(incident_energy_kev: f64, scattering_angle_deg: f64) -> f64 {
    let theta = scattering_angle_deg.to_radians();
    incident_energy_kev
        / (1.0 + (incident_energy_kev / ELECTRON_REST_ENERGY_KEV) * (1.0 - theta.cos()))
}

/// Compton energy at the 90-degree geometry of a typical scanning setup.
#[inline]
pub fn compton_energy_90(incident_energy_kev: f64) -> f64 {
    compton_energy(incident_energy_kev, 90.0)
}
