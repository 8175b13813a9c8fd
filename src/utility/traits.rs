
use serenity::model::prelude::*;
use serenity::builder::{CreateEmbed, CreateMessage};

use std::str::FromStr;


pub trait Singleton: Sized {
    fn get_instance() -> &'static tokio::sync::Mutex<Self>;
    fn new() -> Self;
}

#[macro_export]
macro_rules! impl_singleton {
    ($t:ty) => {
        impl $crate::utility::traits::Singleton for $t {
            fn get_instance() -> &'static tokio::sync::Mutex<Self> {
                static INSTANCE: once_cell::sync::Lazy<tokio::sync::Mutex<$t>> =
                    once_cell::sync::Lazy::new(|| tokio::sync::Mutex::new(<$t>::new()));
                &INSTANCE
            }

            fn new() -> Self {
                <$t>::new()
            }
        }
    };
}


pub trait ToList<T: ?Sized> {
    fn to_list(&self) -> Vec<T> where T: Clone;
}

impl<T> ToList<T> for T {
    fn to_list(&self) -> Vec<T> where T: Clone {
        vec![self.clone()]
    }
}

impl<T> ToList<T> for Vec<T> {
    fn to_list(&self) -> Vec<T> where T: Clone {
        self.clone()
    }
}

impl<T> ToList<T> for &T {
    fn to_list(&self) -> Vec<T> where T: Clone {
        vec![(*self).clone()]
    }
}

impl<T> ToList<T> for Vec<&T> {
    fn to_list(&self) -> Vec<T> where T: Clone {
        self.iter().map(|s| (*s).clone()).collect()
    }
}

impl<T> ToList<T> for &[T] {
    fn to_list(&self) -> Vec<T> where T: Clone {
        self.iter().map(|s| s.clone()).collect()
    }
}

impl ToList<RoleId> for String {
    fn to_list(&self) -> Vec<RoleId> {
        match RoleId::from_str(self) {
            Ok(role) => vec![role],
            Err(_)   => Vec::new(),
        }
    }
}

impl ToList<RoleId> for Vec<String> {
    fn to_list(&self) -> Vec<RoleId> {
        self.iter()
            .filter_map(|role| RoleId::from_str(role).ok())
            .collect()
    }
}


pub trait ToMessage {
    fn to_message(&self) -> CreateMessage;
}

impl ToMessage for &str {
    fn to_message(&self) -> CreateMessage {
        CreateMessage::default().content(self.to_string())
    }
}

impl ToMessage for String {
    fn to_message(&self) -> CreateMessage {
        CreateMessage::default().content(self.to_string())
    }
}

impl ToMessage for &String {
    fn to_message(&self) -> CreateMessage {
        CreateMessage::default().content(self.to_string())
    }
}

impl ToMessage for CreateEmbed {
    fn to_message(&self) -> CreateMessage {
        CreateMessage::default().embed(self.clone())
    }
}

impl ToMessage for CreateMessage {
    fn to_message(&self) -> CreateMessage {
        self.clone()
    }
}
