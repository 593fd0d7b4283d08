//! Known raid and dungeon activity hashes.
//!
//! Raids are reissued and get extra difficulty tiers, so several hashes can
//! share one display name. Dungeon hashes are one per name.

use crate::models::ActivityHash;

pub const RAID_TABLE: &[(ActivityHash, &str)] = &[
    (2122313384, "Last Wish"),
    (1661734046, "Last Wish"),
    (1042180643, "Garden of Salvation"),
    (2497200493, "Garden of Salvation"),
    (2659723068, "Garden of Salvation"),
    (3458480158, "Garden of Salvation"),
    (3845997235, "Garden of Salvation"),
    (3213556450, "Garden of Salvation"),
    (2693136600, "Garden of Salvation"),
    (910380154, "Deep Stone Crypt"),
    (3976949817, "Deep Stone Crypt"),
    (3881495763, "Vault of Glass"),
    (1485585878, "Vault of Glass"),
    (3711931140, "Vault of Glass"),
    (1681562271, "Vault of Glass"),
    (1441982566, "Vow of the Disciple"),
    (4156879541, "Vow of the Disciple"),
    (4217492330, "Vow of the Disciple"),
    (2906950631, "Vow of the Disciple"),
    (1374392663, "King's Fall"),
    (1063970578, "King's Fall"),
    (2897223272, "King's Fall"),
    (2964135793, "King's Fall"),
    (3257594522, "King's Fall"),
    (2381413764, "Root of Nightmares"),
    (2918919505, "Root of Nightmares"),
    (1191701339, "Root of Nightmares"),
    (4179289725, "Crota's End"),
    (1507509200, "Crota's End"),
    (107319834, "Crota's End"),
    (156253568, "Crota's End"),
    (1541433876, "Salvation's Edge"),
    (2192826039, "Salvation's Edge"),
    (4129614942, "Salvation's Edge"),
    (940375169, "Salvation's Edge"),
    (3817322389, "The Desert Perpetual"),
    (1044919065, "The Desert Perpetual"),
];

pub const DUNGEON_TABLE: &[(ActivityHash, &str)] = &[
    (2032534090, "The Shattered Throne"),
    (2582501063, "Pit of Heresy"),
    (1077850348, "Prophecy"),
    (4078656646, "Grasp of Avarice"),
    (2823159265, "Duality"),
    (1262462921, "Spire of the Watcher"),
    (313828469, "Ghosts of the Deep"),
    (3834447244, "Warlord's Ruin"),
    (300092127, "Vesper's Host"),
    (2727361621, "Sundered Doctrine"),
];
