// Copyright (C) 2020  Pierre Krieger
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use super::{ForeignStruct as _, Padding};
use crate::{memory::Arena, value::MemberKind, ValueType};
use core::ffi::c_void;

crate::foreign_struct! {
    pub struct Inner {
        pub next: *const c_void,
        pub kind: u32,
    }

    pub struct Outer {
        pub tag: u8,
        pub inner: Inner,
        pub count: u16,
        pub r#type: u32,
        pub size: u64,
    }
}

#[test]
fn layout_matches_rust() {
    let layout = Outer::LAYOUT;
    assert_eq!(layout.name, "Outer");
    assert_eq!(layout.size, core::mem::size_of::<Outer>());
    assert_eq!(layout.align, core::mem::align_of::<Outer>());
    assert_eq!(layout.fields.len(), 5);

    let inner = layout.field("inner").unwrap();
    assert_eq!(inner.offset(), core::mem::offset_of!(Outer, inner));
    assert_eq!(inner.size(), core::mem::size_of::<Inner>());
    assert!(matches!(inner.kind(), MemberKind::Struct(l) if l.name == "Inner"));

    let size = layout.field("size").unwrap();
    assert_eq!(size.kind().value_type(), Some(ValueType::U64));
}

#[test]
fn raw_identifiers_keep_c_name() {
    assert_eq!(Outer::r#type.layout().name(), "type");
    assert!(Outer::LAYOUT.field("type").is_some());
    assert!(Outer::LAYOUT.field("r#type").is_none());
}

#[test]
fn missing_field() {
    assert!(Outer::LAYOUT.field("nope").is_none());
}

#[cfg(target_pointer_width = "64")]
#[test]
fn padding_between_fields() {
    // tag: 0..1, inner: 8..24, count: 24..26, type: 28..32, size: 32..40
    assert_eq!(
        &Outer::LAYOUT.padding()[..],
        &[Padding { offset: 1, len: 7 }, Padding { offset: 26, len: 2 }][..]
    );
    // next: 0..8, kind: 8..12, then trailing padding
    assert_eq!(
        &Inner::LAYOUT.padding()[..],
        &[Padding { offset: 12, len: 4 }][..]
    );
}

#[test]
fn get_set_fields() {
    let arena = Arena::new();
    let outer = Outer::allocate(&arena);
    assert_eq!(outer.byte_size(), Outer::sizeof());

    Outer::count.set(&outer, 0xbeef);
    Outer::size.set(&outer, u64::max_value());
    assert_eq!(Outer::count.get(&outer), 0xbeef);
    assert_eq!(Outer::size.get(&outer), u64::max_value());
    assert_eq!(Outer::tag.get(&outer), 0);

    let inner = Outer::inner.slice(&outer);
    assert_eq!(inner.byte_size(), Inner::sizeof());
    Inner::kind.set(&inner, 9);
    assert_eq!(Outer::read(&outer).inner.kind, 9);
}

#[test]
fn arrays() {
    let arena = Arena::new();
    let array = Inner::allocate_array(3, &arena);
    assert_eq!(array.byte_size(), 3 * Inner::sizeof());

    for index in 0..3 {
        Inner::kind.set(&Inner::as_slice(&array, index), index as u32 + 10);
    }
    assert_eq!(Inner::kind.get(&Inner::as_slice(&array, 2)), 12);
    assert_eq!(
        array.get::<u32>(Inner::sizeof() + Inner::kind.offset()),
        11
    );
}

#[test]
#[should_panic]
fn array_index_out_of_bounds() {
    let arena = Arena::new();
    let array = Inner::allocate_array(2, &arena);
    Inner::as_slice(&array, 2);
}

#[test]
#[should_panic]
fn array_size_overflow() {
    let arena = Arena::new();
    Inner::allocate_array(usize::max_value(), &arena);
}

#[test]
fn reinterpret_native_memory() {
    let mut native = Inner {
        next: core::ptr::null(),
        kind: 4,
    };

    let arena = Arena::new();
    let segment = unsafe {
        Inner::reinterpret(&mut native as *mut Inner as *mut c_void, &arena, |_| {})
    };
    assert_eq!(segment.byte_size(), Inner::sizeof());
    assert_eq!(Inner::kind.get(&segment), 4);
    Inner::kind.set(&segment, 5);
    drop(arena);
    assert_eq!(native.kind, 5);
}

#[test]
fn display_lists_fields() {
    let text = Inner::LAYOUT.to_string();
    assert!(text.starts_with("struct Inner"));
    assert!(text.contains("kind"));
}
