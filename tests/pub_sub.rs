use std::time::Duration;

use sensorcast::{
    Endpoint, Publisher, Reading, Sampler, Subscriber, SubscriptionFilter, Topic, WireFormat,
};

/// Время, за которое подписка доходит до PUB-сокета.
const SETTLE: Duration = Duration::from_millis(200);
const RECV_WAIT: Duration = Duration::from_millis(500);

fn settle() {
    std::thread::sleep(SETTLE);
}

fn drain(sub: &mut Subscriber) -> Vec<String> {
    let mut out = Vec::new();
    while let Some(delivery) = sub.recv_timeout(Duration::from_millis(150)).unwrap() {
        out.push(delivery.payload);
    }
    out
}

/// Подписчик на `Humidity` получает только сообщение о влажности.
#[test]
fn test_topic_filter_delivers_only_matching_prefix() {
    let ctx = zmq::Context::new();
    let endpoint = Endpoint::inproc("it-humidity-only");
    let mut publisher = Publisher::bind(&ctx, &endpoint).unwrap();
    let mut sub = Subscriber::connect(&ctx, &endpoint, SubscriptionFilter::new("Humidity")).unwrap();
    settle();

    publisher.publish("Temperature 22°C").unwrap();
    publisher.publish("Humidity 65%").unwrap();
    publisher.publish("Pressure 1001hPa").unwrap();

    let delivery = sub.recv_timeout(RECV_WAIT).unwrap().expect("humidity reading");
    assert_eq!(delivery.seq, 1);
    assert_eq!(delivery.payload, "Humidity 65%");
    assert!(drain(&mut sub).is_empty());
    assert_eq!(sub.received(), 1);
    assert_eq!(publisher.sent(), 3);
}

/// Блокирующее получение без таймаута отдаёт уже пришедшее сообщение.
#[test]
fn test_blocking_recv_returns_next_message() {
    let ctx = zmq::Context::new();
    let endpoint = Endpoint::inproc("it-blocking-recv");
    let mut publisher = Publisher::bind(&ctx, &endpoint).unwrap();
    let mut sub = Subscriber::connect(&ctx, &endpoint, SubscriptionFilter::all()).unwrap();
    settle();

    publisher.publish("Temperature: 19°C").unwrap();
    let delivery = sub.recv().unwrap();
    assert_eq!(delivery.seq, 1);
    assert_eq!(delivery.payload, "Temperature: 19°C");
    assert_eq!(sub.close(), 1);
}

/// Сообщения, отправленные до подключения подписчика, не доставляются.
#[test]
fn test_late_joiner_misses_earlier_messages() {
    let ctx = zmq::Context::new();
    let endpoint = Endpoint::inproc("it-late-joiner");
    let mut publisher = Publisher::bind(&ctx, &endpoint).unwrap();

    for value in [20, 21, 22] {
        publisher
            .publish(&Reading::new(Topic::Temperature, value).encode(WireFormat::Plain))
            .unwrap();
    }

    let mut sub = Subscriber::connect(&ctx, &endpoint, SubscriptionFilter::all()).unwrap();
    assert!(sub.recv_timeout(Duration::from_millis(200)).unwrap().is_none());
    assert_eq!(sub.received(), 0);
}

/// Пустой фильтр пропускает все темы в порядке отправки.
#[test]
fn test_empty_filter_receives_every_topic_in_order() {
    let ctx = zmq::Context::new();
    let endpoint = Endpoint::inproc("it-all-topics");
    let mut publisher = Publisher::bind(&ctx, &endpoint).unwrap();
    let mut sub = Subscriber::connect(&ctx, &endpoint, SubscriptionFilter::from(None::<String>)).unwrap();
    settle();

    let sent: Vec<String> = [
        Reading::new(Topic::Temperature, 18),
        Reading::new(Topic::Humidity, 71),
        Reading::new(Topic::Pressure, 995),
    ]
    .iter()
    .map(|r| r.encode(WireFormat::Tagged))
    .collect();
    for payload in &sent {
        publisher.publish(payload).unwrap();
    }

    assert_eq!(drain(&mut sub), sent);
    assert_eq!(sub.received(), 3);
}

/// Подписчик на `Temperature` не видит других тем ни в одной из выборок.
#[test]
fn test_temperature_filter_never_sees_other_topics() {
    let ctx = zmq::Context::new();
    let endpoint = Endpoint::inproc("it-temperature-only");
    let mut publisher = Publisher::bind(&ctx, &endpoint).unwrap();
    let filter = SubscriptionFilter::topic(Topic::Temperature);
    let mut sub = Subscriber::connect(&ctx, &endpoint, filter.clone()).unwrap();
    settle();

    let mut sampler = Sampler::seeded(7);
    let mut expected = Vec::new();
    for _ in 0..30 {
        let payload = sampler.next_reading().encode(WireFormat::Tagged);
        if filter.matches(payload.as_bytes()) {
            expected.push(payload.clone());
        }
        publisher.publish(&payload).unwrap();
    }

    let got = drain(&mut sub);
    assert_eq!(got, expected);
    for payload in &got {
        let reading = Reading::parse_tagged(payload).unwrap();
        assert_eq!(reading.topic, Topic::Temperature);
        assert!(reading.in_range());
    }
}

/// Сравнение префикса чувствительно к регистру.
#[test]
fn test_filter_is_case_sensitive() {
    let ctx = zmq::Context::new();
    let endpoint = Endpoint::inproc("it-case-sensitive");
    let mut publisher = Publisher::bind(&ctx, &endpoint).unwrap();
    let mut sub = Subscriber::connect(&ctx, &endpoint, SubscriptionFilter::new("humidity")).unwrap();
    settle();

    publisher.publish("Humidity 65%").unwrap();
    assert!(sub.recv_timeout(Duration::from_millis(200)).unwrap().is_none());
}

/// Каждый подписчик получает свою копию и ведёт свой счётчик.
#[test]
fn test_fan_out_to_independent_subscribers() {
    let ctx = zmq::Context::new();
    let endpoint = Endpoint::inproc("it-fan-out");
    let mut publisher = Publisher::bind(&ctx, &endpoint).unwrap();
    let mut all = Subscriber::connect(&ctx, &endpoint, SubscriptionFilter::all()).unwrap();
    let mut pressure =
        Subscriber::connect(&ctx, &endpoint, SubscriptionFilter::topic(Topic::Pressure)).unwrap();
    settle();

    publisher.publish("Pressure 1001hPa").unwrap();
    publisher.publish("Humidity 50%").unwrap();

    assert_eq!(drain(&mut all), vec!["Pressure 1001hPa", "Humidity 50%"]);
    assert_eq!(drain(&mut pressure), vec!["Pressure 1001hPa"]);
    assert_eq!(all.received(), 2);
    assert_eq!(pressure.received(), 1);
}

/// Публикатор на эфемерном TCP-порту сообщает реальный порт.
#[test]
fn test_tcp_ephemeral_port_round_trip() {
    let ctx = zmq::Context::new();
    let mut publisher = Publisher::bind(&ctx, &Endpoint::new("tcp://127.0.0.1:*")).unwrap();
    let port = publisher.endpoint().port().expect("concrete port");
    assert_ne!(port, 0);

    let mut sub = Subscriber::connect(
        &ctx,
        &Endpoint::tcp("127.0.0.1", port),
        SubscriptionFilter::topic(Topic::Pressure),
    )
    .unwrap();
    std::thread::sleep(Duration::from_millis(500));

    publisher.publish("Humidity 44%").unwrap();
    publisher.publish("Pressure 1013hPa").unwrap();

    let delivery = sub.recv_timeout(Duration::from_secs(2)).unwrap().expect("pressure reading");
    assert_eq!(delivery.payload, "Pressure 1013hPa");
    assert_eq!(delivery.seq, 1);
}
