use crate::client::{AtError, CommandChannel};
use crate::domain::Message;

#[derive(Debug, Clone, Default)]
/// Messages read from device storage, in the order the device listed them.
///
/// Deleting an entry tombstones it in memory before the device is asked to
/// delete the slot. If the device call fails the two are not reconciled.
///
/// A list only exists when every listed record decoded. A record whose
/// originator is not a phone number, such as an alphanumeric sender like
/// `Bank`, fails the whole listing, so its slot never reaches a list. Such a
/// slot can still be removed with [`CommandChannel::delete`] when its index is
/// known.
pub struct MessageList {
    slots: Vec<Option<Message>>,
}

impl MessageList {
    /// Build a list from decoded records. A repeated index replaces the earlier
    /// record in place.
    pub(crate) fn from_messages(messages: Vec<Message>) -> Self {
        let mut list = Self::default();
        for msg in messages {
            match list.position(msg.index()) {
                Some(pos) => list.slots[pos] = Some(msg),
                None => list.slots.push(Some(msg)),
            }
        }
        list
    }

    fn position(&self, index: Option<u32>) -> Option<usize> {
        index?;
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|msg| msg.index() == index))
    }

    /// Live message stored in device slot `index`.
    pub fn get(&self, index: u32) -> Option<&Message> {
        self.iter().find(|msg| msg.index() == Some(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tombstone slot `index` and delete it on the device with `AT+CMGD`.
    ///
    /// The command is sent even when the list holds no entry for `index`.
    pub fn delete(&mut self, channel: &mut CommandChannel, index: u32) -> Result<(), AtError> {
        if let Some(pos) = self.position(Some(index)) {
            self.slots[pos] = None;
        }
        channel.delete(index)
    }

    /// Delete `message` by its device storage index.
    ///
    /// Returns [`AtError::NotStored`] for messages that were not read from the device.
    pub fn delete_message(
        &mut self,
        channel: &mut CommandChannel,
        message: &Message,
    ) -> Result<(), AtError> {
        let index = message.index().ok_or(AtError::NotStored)?;
        self.delete(channel, index)
    }

    /// Delete every live entry, one command each in list order, then empty the list.
    pub fn delete_all(&mut self, channel: &mut CommandChannel) -> Result<(), AtError> {
        let indices: Vec<u32> = self.iter().filter_map(Message::index).collect();
        for index in indices {
            self.delete(channel, index)?;
        }
        self.slots.clear();
        Ok(())
    }
}

impl<'a> IntoIterator for &'a MessageList {
    type Item = &'a Message;
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Option<Message>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::{FakeTransport, open};
    use crate::domain::{MessageStatus, Number};

    use super::*;

    fn stored(index: u32, text: &str) -> Message {
        Message::stored(
            index,
            MessageStatus::new("REC READ"),
            Number::new("+15551234").unwrap(),
            text,
        )
    }

    fn list() -> MessageList {
        MessageList::from_messages(vec![stored(4, "four"), stored(1, "one"), stored(9, "nine")])
    }

    fn indices(list: &MessageList) -> Vec<u32> {
        list.iter().filter_map(Message::index).collect()
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let list = list();
        assert_eq!(indices(&list), vec![4, 1, 9]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1).map(Message::text), Some("one"));
        assert!(list.get(2).is_none());

        let texts: Vec<_> = (&list).into_iter().map(Message::text).collect();
        assert_eq!(texts, vec!["four", "one", "nine"]);
    }

    #[test]
    fn repeated_index_replaces_in_place() {
        let list = MessageList::from_messages(vec![stored(2, "old"), stored(5, "x"), stored(2, "new")]);
        assert_eq!(indices(&list), vec![2, 5]);
        assert_eq!(list.get(2).map(Message::text), Some("new"));
    }

    #[test]
    fn delete_tombstones_and_sends_cmgd() {
        let transport = FakeTransport::after_handshake().respond("\r\nOK\r\n");
        let mut channel = open(&transport);
        let mut list = list();

        list.delete(&mut channel, 1).unwrap();
        assert_eq!(indices(&list), vec![4, 9]);
        assert!(list.get(1).is_none());
        assert_eq!(transport.writes(), vec!["AT+CMGD=1\r\n"]);
    }

    #[test]
    fn delete_keeps_tombstone_when_device_fails() {
        let transport = FakeTransport::after_handshake().respond("\r\nERROR\r\n");
        let mut channel = open(&transport);
        let mut list = list();

        assert!(matches!(list.delete(&mut channel, 4), Err(AtError::Device(_))));
        assert_eq!(indices(&list), vec![1, 9]);
    }

    #[test]
    fn delete_unknown_index_still_reaches_device() {
        let transport = FakeTransport::after_handshake();
        let mut channel = open(&transport);
        let mut list = list();

        list.delete(&mut channel, 12).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(transport.writes(), vec!["AT+CMGD=12\r\n"]);
    }

    #[test]
    fn delete_message_resolves_its_index() {
        let transport = FakeTransport::after_handshake();
        let mut channel = open(&transport);
        let mut list = list();

        let target = list.get(9).cloned().unwrap();
        list.delete_message(&mut channel, &target).unwrap();
        assert_eq!(indices(&list), vec![4, 1]);
        assert_eq!(transport.writes(), vec!["AT+CMGD=9\r\n"]);

        transport.clear();
        let outgoing = Message::outgoing(Number::new("1").unwrap(), "hi");
        assert!(matches!(
            list.delete_message(&mut channel, &outgoing),
            Err(AtError::NotStored)
        ));
        assert!(transport.writes().is_empty());
    }

    #[test]
    fn delete_all_deletes_live_entries_in_order_then_clears() {
        let transport = FakeTransport::after_handshake();
        let mut channel = open(&transport);
        let mut list = list();

        list.delete(&mut channel, 1).unwrap();
        transport.clear();

        list.delete_all(&mut channel).unwrap();
        assert!(list.is_empty());
        assert_eq!(transport.writes(), vec!["AT+CMGD=4\r\n", "AT+CMGD=9\r\n"]);
    }

    #[test]
    fn delete_all_stops_at_first_device_error() {
        let transport = FakeTransport::after_handshake()
            .respond("OK")
            .respond("ERROR");
        let mut channel = open(&transport);
        let mut list = list();

        assert!(list.delete_all(&mut channel).is_err());
        assert_eq!(transport.writes().len(), 2);
        assert_eq!(indices(&list), vec![9]);
    }
}
