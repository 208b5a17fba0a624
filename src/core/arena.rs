//! Dichte Arena-Speicher mit typisierten, generationsbehafteten IDs.
//!
//! Entfernte Einträge hinterlassen einen Tombstone, der Slot wandert in die
//! Freiliste. Bei Wiederverwendung ist die Generation bereits erhöht, dadurch
//! lösen veraltete IDs nie auf einen fremden Eintrag auf.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

/// Roh-ID eines Arena-Slots (Index + Generation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RawId {
    /// Slot-Index in der Arena
    pub index: u32,
    /// Generation des Slots zum Zeitpunkt der Vergabe
    pub generation: u32,
}

/// Typisierter Schlüssel für eine [`Arena`].
pub trait ArenaKey: Copy + Eq {
    /// Erzeugt den Schlüssel aus einer Roh-ID.
    fn from_raw(raw: RawId) -> Self;
    /// Liefert die Roh-ID des Schlüssels.
    fn raw(self) -> RawId;
}

macro_rules! arena_key {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub RawId);

        impl $name {
            /// Erstellt eine ID aus Index und Generation.
            pub const fn new(index: u32, generation: u32) -> Self {
                Self(RawId { index, generation })
            }
        }

        impl ArenaKey for $name {
            fn from_raw(raw: RawId) -> Self {
                Self(raw)
            }

            fn raw(self) -> RawId {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.0.generation == 0 {
                    write!(f, "{}{}", $prefix, self.0.index)
                } else {
                    write!(f, "{}{}#{}", $prefix, self.0.index, self.0.generation)
                }
            }
        }
    };
}

arena_key!(
    /// ID eines Graph-Knotens
    NodeId,
    "N"
);
arena_key!(
    /// ID einer Wand (Graph-Kante)
    WallId,
    "W"
);
arena_key!(
    /// ID einer Tür oder eines Fensters
    OpeningId,
    "O"
);
arena_key!(
    /// ID eines Raums
    RoomId,
    "R"
);
arena_key!(
    /// ID einer Ebene
    LayerId,
    "L"
);

#[derive(Debug, Clone, PartialEq)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Arena mit Freiliste; Iteration erfolgt stabil in Slot-Reihenfolge.
#[derive(Debug, Clone, PartialEq)]
pub struct Arena<K, T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    len: usize,
    _key: PhantomData<fn() -> K>,
}

impl<K: ArenaKey, T> Default for Arena<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ArenaKey, T> Arena<K, T> {
    /// Erstellt eine leere Arena.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
            _key: PhantomData,
        }
    }

    /// Anzahl belegter Slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true`, wenn kein Eintrag belegt ist.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Legt einen Eintrag ab; nutzt bevorzugt einen freigegebenen Slot.
    pub fn insert(&mut self, value: T) -> K {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return K::from_raw(RawId {
                index,
                generation: slot.generation,
            });
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        K::from_raw(RawId {
            index,
            generation: 0,
        })
    }

    /// Legt einen Eintrag unter einer vorgegebenen ID ab (Import).
    ///
    /// Schlägt fehl, wenn der Slot bereits belegt ist. Der Aufrufer begrenzt
    /// den Index. Nach einer Import-Serie muss [`Arena::seal_import`]
    /// aufgerufen werden.
    pub fn insert_at(&mut self, key: K, value: T) -> Result<(), T> {
        let raw = key.raw();
        let index = raw.index as usize;
        if index < self.slots.len() && self.slots[index].value.is_some() {
            return Err(value);
        }
        self.ensure_slot(index);
        let slot = &mut self.slots[index];
        slot.generation = raw.generation;
        slot.value = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Reserviert einen leeren Slot mit der Generation aus `key` (Import).
    ///
    /// Reihenfolge der Aufrufe = Reihenfolge der Freiliste. Liefert `false`,
    /// wenn der Slot belegt oder bereits reserviert ist.
    pub fn reserve_tombstone(&mut self, key: K) -> bool {
        let raw = key.raw();
        let index = raw.index as usize;
        let occupied = self.slots.get(index).is_some_and(|slot| slot.value.is_some());
        if occupied || self.free.contains(&raw.index) {
            return false;
        }
        self.ensure_slot(index);
        self.slots[index].generation = raw.generation;
        self.free.push(raw.index);
        true
    }

    /// Schließt einen Import ab.
    ///
    /// Leere Slots ohne Tombstone erhalten mindestens Generation 1, damit eine
    /// früher vergebene ID mit Generation 0 nie wieder aufgelöst wird. Sie
    /// werden nach den Tombstones vergeben (niedrigster Index zuerst).
    pub fn seal_import(&mut self) {
        let reserved: HashSet<u32> = self.free.iter().copied().collect();
        let mut gaps: Vec<u32> = self
            .slots
            .iter()
            .enumerate()
            .rev()
            .filter(|(index, slot)| slot.value.is_none() && !reserved.contains(&(*index as u32)))
            .map(|(index, _)| index as u32)
            .collect();
        for &index in &gaps {
            let slot = &mut self.slots[index as usize];
            slot.generation = slot.generation.max(1);
        }
        gaps.append(&mut self.free);
        self.free = gaps;
    }

    /// Freie Slots als IDs mit aktueller Generation, in Freilisten-Reihenfolge.
    pub fn tombstones(&self) -> impl Iterator<Item = K> + '_ {
        self.free.iter().filter_map(|&index| {
            self.slots.get(index as usize).map(|slot| {
                K::from_raw(RawId {
                    index,
                    generation: slot.generation,
                })
            })
        })
    }

    fn ensure_slot(&mut self, index: usize) {
        if index >= self.slots.len() {
            self.slots.resize_with(index + 1, || Slot {
                generation: 0,
                value: None,
            });
        }
    }

    /// Entfernt einen Eintrag und erhöht die Generation des Slots.
    pub fn remove(&mut self, key: K) -> Option<T> {
        let raw = key.raw();
        let slot = self.slots.get_mut(raw.index as usize)?;
        if slot.generation != raw.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(raw.index);
        self.len -= 1;
        Some(value)
    }

    /// Liefert den Eintrag, falls die ID (inkl. Generation) noch gültig ist.
    pub fn get(&self, key: K) -> Option<&T> {
        let raw = key.raw();
        self.slots
            .get(raw.index as usize)
            .filter(|slot| slot.generation == raw.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    /// Mutable Variante von [`Arena::get`].
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        let raw = key.raw();
        self.slots
            .get_mut(raw.index as usize)
            .filter(|slot| slot.generation == raw.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    /// Prüft ob die ID auf einen lebenden Eintrag zeigt.
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Iteriert über alle lebenden Einträge in Slot-Reihenfolge.
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    K::from_raw(RawId {
                        index: index as u32,
                        generation: slot.generation,
                    }),
                    value,
                )
            })
        })
    }

    /// Iteriert über alle lebenden IDs.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.iter().map(|(id, _)| id)
    }

    /// Iteriert über alle lebenden Werte.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.iter().map(|(_, value)| value)
    }
}
