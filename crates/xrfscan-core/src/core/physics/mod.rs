//! Physics functions constraining peak identification.
//!
//! [`excitation`] maps line families to the shells they resolve against, looks up
//! absorption edges, and scores how efficiently an incident beam excites a line.
//! [`scatter`] computes Compton-scattered photon energies. Both are pure
//! functions over the atomic-data provider; nothing in this module holds state.

pub mod excitation;
pub mod scatter;
